//! HTTP API surface.
//!
//! Thin actix-web layer over the sync engine. Handlers only call the
//! engine's reader methods and never touch the network themselves; every
//! successful response is wrapped in a `{"data": ...}` envelope.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::{
	models::Transaction,
	services::{ethereum::EthereumApi, parser::Parser},
	utils::metrics,
};

/// Envelope wrapping every successful response body
#[derive(Serialize)]
struct ApiResponse<T> {
	data: T,
}

/// Body of client error responses
#[derive(Serialize)]
struct ErrorResponse {
	error: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CurrentBlockData {
	block_number: i64,
}

#[derive(Serialize)]
struct MessageData {
	message: String,
}

#[derive(Serialize)]
struct TransactionsData {
	transactions: Vec<Transaction>,
}

/// Query parameters for the address-scoped endpoints
#[derive(Deserialize)]
pub struct AddressQuery {
	address: Option<String>,
}

impl AddressQuery {
	/// Returns the address or the client error response for a missing one
	fn require_address(&self) -> Result<&str, HttpResponse> {
		match self.address.as_deref() {
			Some(address) if !address.is_empty() => Ok(address),
			_ => Err(HttpResponse::BadRequest().json(ErrorResponse {
				error: "address is required".to_string(),
			})),
		}
	}
}

/// `GET /currentBlock` - the last fully processed block number
pub async fn current_block<C: EthereumApi + 'static>(
	engine: web::Data<Parser<C>>,
) -> HttpResponse {
	HttpResponse::Ok().json(ApiResponse {
		data: CurrentBlockData {
			block_number: engine.get_current_block(),
		},
	})
}

/// `GET /subscribe?address=X` - adds an address to the subscription set
pub async fn subscribe<C: EthereumApi + 'static>(
	engine: web::Data<Parser<C>>,
	query: web::Query<AddressQuery>,
) -> HttpResponse {
	let address = match query.require_address() {
		Ok(address) => address,
		Err(response) => return response,
	};

	let message = if engine.subscribe(address) {
		format!("Subscribed to address: {}", address)
	} else {
		format!("Already subscribed to address: {}", address)
	};

	HttpResponse::Ok().json(ApiResponse {
		data: MessageData { message },
	})
}

/// `GET /transactions?address=X` - the recorded history of a subscribed address
pub async fn transactions<C: EthereumApi + 'static>(
	engine: web::Data<Parser<C>>,
	query: web::Query<AddressQuery>,
) -> HttpResponse {
	let address = match query.require_address() {
		Ok(address) => address,
		Err(response) => return response,
	};

	HttpResponse::Ok().json(ApiResponse {
		data: TransactionsData {
			transactions: engine.get_transactions(address),
		},
	})
}

/// `GET /metrics` - prometheus text exposition
pub async fn metrics_endpoint() -> HttpResponse {
	match metrics::gather_metrics() {
		Ok(body) => HttpResponse::Ok()
			.content_type("text/plain; version=0.0.4; charset=utf-8")
			.body(body),
		Err(e) => {
			tracing::error!(error = %e, "failed to gather metrics");
			HttpResponse::InternalServerError().finish()
		}
	}
}

/// Registers the API routes on an actix service config
pub fn configure<C: EthereumApi + 'static>(cfg: &mut web::ServiceConfig) {
	cfg.route("/currentBlock", web::get().to(current_block::<C>))
		.route("/subscribe", web::get().to(subscribe::<C>))
		.route("/transactions", web::get().to(transactions::<C>))
		.route("/metrics", web::get().to(metrics_endpoint));
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{models::ParserConfig, services::ethereum::EthereumClientError};
	use actix_web::{test, App};
	use async_trait::async_trait;
	use serde_json::Value;

	/// RPC client stub; reader endpoints never reach the network
	struct StaticApi;

	#[async_trait]
	impl EthereumApi for StaticApi {
		async fn get_current_block(&self) -> Result<String, EthereumClientError> {
			Ok("0x0".to_string())
		}

		async fn get_transactions(
			&self,
			_block_number: &str,
		) -> Result<Vec<Value>, EthereumClientError> {
			Ok(Vec::new())
		}
	}

	fn test_engine() -> web::Data<Parser<StaticApi>> {
		web::Data::new(Parser::new(StaticApi, ParserConfig::default()))
	}

	#[actix_web::test]
	async fn test_current_block_envelope() {
		let app = test::init_service(
			App::new()
				.app_data(test_engine())
				.configure(configure::<StaticApi>),
		)
		.await;

		let req = test::TestRequest::get().uri("/currentBlock").to_request();
		let body: Value = test::call_and_read_body_json(&app, req).await;

		assert_eq!(body["data"]["blockNumber"], -1);
	}

	#[actix_web::test]
	async fn test_subscribe_and_resubscribe() {
		let app = test::init_service(
			App::new()
				.app_data(test_engine())
				.configure(configure::<StaticApi>),
		)
		.await;

		let req = test::TestRequest::get()
			.uri("/subscribe?address=0xABC")
			.to_request();
		let body: Value = test::call_and_read_body_json(&app, req).await;
		assert_eq!(body["data"]["message"], "Subscribed to address: 0xABC");

		// same address in a different casing is already subscribed
		let req = test::TestRequest::get()
			.uri("/subscribe?address=0xabc")
			.to_request();
		let body: Value = test::call_and_read_body_json(&app, req).await;
		assert_eq!(
			body["data"]["message"],
			"Already subscribed to address: 0xabc"
		);
	}

	#[actix_web::test]
	async fn test_subscribe_without_address_is_client_error() {
		let app = test::init_service(
			App::new()
				.app_data(test_engine())
				.configure(configure::<StaticApi>),
		)
		.await;

		let req = test::TestRequest::get().uri("/subscribe").to_request();
		let resp = test::call_service(&app, req).await;

		assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
	}

	#[actix_web::test]
	async fn test_transactions_for_subscribed_address() {
		let app = test::init_service(
			App::new()
				.app_data(test_engine())
				.configure(configure::<StaticApi>),
		)
		.await;

		let req = test::TestRequest::get()
			.uri("/subscribe?address=0xabc")
			.to_request();
		test::call_service(&app, req).await;

		let req = test::TestRequest::get()
			.uri("/transactions?address=0xabc")
			.to_request();
		let body: Value = test::call_and_read_body_json(&app, req).await;

		assert_eq!(body["data"]["transactions"], Value::Array(vec![]));
	}

	#[actix_web::test]
	async fn test_transactions_without_address_is_client_error() {
		let app = test::init_service(
			App::new()
				.app_data(test_engine())
				.configure(configure::<StaticApi>),
		)
		.await;

		let req = test::TestRequest::get().uri("/transactions").to_request();
		let resp = test::call_service(&app, req).await;

		assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
	}

	#[actix_web::test]
	async fn test_metrics_endpoint() {
		let app = test::init_service(
			App::new()
				.app_data(test_engine())
				.configure(configure::<StaticApi>),
		)
		.await;

		let req = test::TestRequest::get().uri("/metrics").to_request();
		let resp = test::call_service(&app, req).await;

		assert!(resp.status().is_success());
	}
}
