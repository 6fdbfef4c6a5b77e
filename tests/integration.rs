//! End-to-end test: JSON-RPC transport -> sync engine -> reader methods.

use serde_json::json;
use std::{sync::Arc, time::Duration};

use eth_tx_parser::{
	models::ParserConfig,
	services::{ethereum::EthereumClient, parser::Parser},
};

#[tokio::test]
async fn test_engine_syncs_from_rpc_and_serves_readers() {
	let mut server = mockito::Server::new_async().await;

	server
		.mock("POST", "/")
		.match_body(mockito::Matcher::PartialJson(json!({
			"method": "eth_blockNumber",
		})))
		.with_status(200)
		.with_body(r#"{"jsonrpc":"2.0","id":1,"result":"0x1b4"}"#)
		.create_async()
		.await;

	server
		.mock("POST", "/")
		.match_body(mockito::Matcher::PartialJson(json!({
			"method": "eth_getBlockByNumber",
			"params": ["0x1b4", true],
		})))
		.with_status(200)
		.with_body(
			r#"{"jsonrpc":"2.0","id":2,"result":{"number":"0x1b4","transactions":[
				{"hash":"0x123","from":"0xABC","to":"0xDEF","value":"0x100"}
			]}}"#,
		)
		.create_async()
		.await;

	let config = ParserConfig {
		rpc_url: server.url(),
		poll_interval: Duration::from_millis(10),
		block_interval: Duration::ZERO,
		stop_timeout: Duration::from_secs(2),
		..ParserConfig::default()
	};
	let client = EthereumClient::new(&config.rpc_url).unwrap();
	let engine = Arc::new(Parser::new(client, config));

	let handle = tokio::spawn({
		let engine = engine.clone();
		async move { engine.run().await }
	});

	// wait for the engine to catch up to the head
	let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
	while engine.get_current_block() != 436 {
		assert!(
			tokio::time::Instant::now() < deadline,
			"engine did not reach the head in time, watermark at {}",
			engine.get_current_block()
		);
		tokio::time::sleep(Duration::from_millis(10)).await;
	}

	// subscribing after the block was processed still yields the entry
	assert!(engine.subscribe("0xabc"));
	assert!(engine.subscribe("0xDEF"));
	let from_txs = engine.get_transactions("0xABC");
	let to_txs = engine.get_transactions("0xdef");
	assert_eq!(from_txs.len(), 1);
	assert_eq!(to_txs.len(), 1);
	assert_eq!(from_txs[0].hash, "0x123");
	assert_eq!(from_txs[0].block_number, 436);

	// an address that never subscribed reads empty despite being indexed
	assert!(engine.get_transactions("0x999").is_empty());

	engine.stop().await.unwrap();
	handle.await.unwrap();
}
