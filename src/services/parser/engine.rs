//! Sync engine implementation.
//!
//! Owns the subscription registry, the per-address transaction index, and the
//! watermark (last fully processed block), and runs the polling loop that
//! keeps them in sync with the remote node. Readers call `subscribe`,
//! `get_transactions`, and `get_current_block` concurrently with the running
//! loop; all shared state sits behind one coarse mutex and network calls
//! always execute outside of it.

use std::{
	collections::{HashMap, HashSet},
	sync::{Mutex, MutexGuard, PoisonError},
};
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use crate::{
	models::{ParserConfig, Transaction},
	services::{ethereum::EthereumApi, parser::error::ParserError},
	utils::{
		hex::{hex_to_int, int_to_hex},
		metrics,
	},
};

/// Watermark value before the first successful head fetch
const UNINITIALIZED: i64 = -1;

/// Shared mutable state of the engine
///
/// Guarded by a single mutex: subscriber volume and block throughput are
/// modest, so one coarse lock is preferred over fine-grained locking.
struct ParserState {
	/// Addresses whose histories are visible to readers
	subscriptions: HashSet<String>,
	/// Per-address transaction sequences, insertion order = discovery order
	transactions: HashMap<String, Vec<Transaction>>,
	/// Last fully processed block number
	current_block: i64,
}

/// The sync engine
///
/// Constructed once at startup with an injected RPC client and configuration,
/// then driven by a single background task calling `run()`. Reader methods
/// never touch the network.
///
/// # Type Parameters
/// * `C` - RPC client implementation (must implement `EthereumApi`)
pub struct Parser<C> {
	api: C,
	config: ParserConfig,
	state: Mutex<ParserState>,
	cancel: CancellationToken,
	done: tokio::sync::Notify,
}

impl<C: EthereumApi> Parser<C> {
	/// Creates a new sync engine with an empty registry and index
	///
	/// # Arguments
	/// * `api` - RPC client used for head and per-block transaction fetches
	/// * `config` - Poll/throttle intervals and the stop timeout
	pub fn new(api: C, config: ParserConfig) -> Self {
		Parser {
			api,
			config,
			state: Mutex::new(ParserState {
				subscriptions: HashSet::new(),
				transactions: HashMap::new(),
				current_block: UNINITIALIZED,
			}),
			cancel: CancellationToken::new(),
			done: tokio::sync::Notify::new(),
		}
	}

	/// Adds an address to the subscription set
	///
	/// The address is lower-cased before insertion. Returns `false` and
	/// leaves state unchanged when the address is already subscribed. The set
	/// grows without bound; there is no eviction.
	pub fn subscribe(&self, address: &str) -> bool {
		let address = address.to_lowercase();
		let mut state = self.state();
		let inserted = state.subscriptions.insert(address);
		if inserted {
			metrics::SUBSCRIPTIONS.set(state.subscriptions.len() as f64);
		}
		inserted
	}

	/// Returns a point-in-time copy of an address's transaction history
	///
	/// Returns an empty sequence when the address is not subscribed,
	/// regardless of what the index holds for it. The copy keeps readers from
	/// observing partial writer mutations or aliasing the writer's storage.
	pub fn get_transactions(&self, address: &str) -> Vec<Transaction> {
		let address = address.to_lowercase();
		let state = self.state();
		if !state.subscriptions.contains(&address) {
			return Vec::new();
		}
		state.transactions.get(&address).cloned().unwrap_or_default()
	}

	/// Returns the watermark verbatim, including the uninitialized sentinel (-1)
	pub fn get_current_block(&self) -> i64 {
		self.state().current_block
	}

	/// Runs the polling loop until `stop()` is called
	///
	/// Every iteration syncs the catch-up range `(watermark, head]` and then
	/// sleeps the configured poll interval. Failures are logged and retried
	/// on the next cycle; nothing the remote node does is fatal.
	#[instrument(skip_all)]
	pub async fn run(&self) {
		tracing::info!("sync engine started");
		loop {
			if self.cancel.is_cancelled() {
				break;
			}
			if let Err(e) = self.sync_once().await {
				tracing::warn!(error = %e, "sync iteration failed, backing off");
			}
			tokio::select! {
				_ = self.cancel.cancelled() => break,
				_ = tokio::time::sleep(self.config.poll_interval) => {}
			}
		}
		tracing::info!("sync engine stopped");
		self.done.notify_one();
	}

	/// Signals the loop to finish its current unit of work and waits for the
	/// acknowledgment, bounded by the configured stop timeout
	///
	/// Shutdown is best-effort: on timeout the caller gets
	/// `ParserError::ShutdownTimeout` and proceeds; the error is never
	/// escalated to a process failure.
	pub async fn stop(&self) -> Result<(), ParserError> {
		tracing::info!("stop requested, waiting for the sync loop to finish");
		self.cancel.cancel();
		tokio::time::timeout(self.config.stop_timeout, self.done.notified())
			.await
			.map_err(|_| ParserError::ShutdownTimeout {
				timeout: self.config.stop_timeout,
			})
	}

	/// Performs one sync iteration: head fetch, catch-up, watermark advance
	async fn sync_once(&self) -> Result<(), ParserError> {
		let head_hex = self
			.api
			.get_current_block()
			.await
			.map_err(ParserError::HeadFetch)?;
		let head = hex_to_int(&head_hex).map_err(|source| ParserError::Conversion {
			value: head_hex,
			source,
		})?;

		let start = {
			let mut state = self.state();
			if head <= state.current_block {
				tracing::debug!(
					head,
					watermark = state.current_block,
					"no new blocks to sync"
				);
				return Ok(());
			}
			// Catch-up starts from the current head, not from genesis
			if state.current_block == UNINITIALIZED {
				state.current_block = head - 1;
				metrics::CURRENT_BLOCK.set(state.current_block as f64);
			}
			state.current_block
		};

		tracing::info!(from = start + 1, to = head, "processing blocks");

		for block in (start + 1)..=head {
			if self.cancel.is_cancelled() {
				return Ok(());
			}
			self.process_block(block).await?;
			{
				let mut state = self.state();
				state.current_block = block;
			}
			metrics::CURRENT_BLOCK.set(block as f64);
			metrics::BLOCKS_PROCESSED.inc();

			// throttle against remote rate limits
			tokio::select! {
				_ = self.cancel.cancelled() => return Ok(()),
				_ = tokio::time::sleep(self.config.block_interval) => {}
			}
		}
		Ok(())
	}

	/// Fetches, parses, and indexes the transactions of one block
	///
	/// Malformed records are skipped with a warning while the rest of the
	/// block is still processed; a zero-length transaction list fails the
	/// whole block.
	async fn process_block(&self, block: i64) -> Result<(), ParserError> {
		let block_hex = int_to_hex(block);
		let records = self
			.api
			.get_transactions(&block_hex)
			.await
			.map_err(|source| ParserError::BlockFetch { block, source })?;

		if records.is_empty() {
			return Err(ParserError::EmptyBlock { block });
		}
		tracing::debug!(block, count = records.len(), "found transactions");

		let mut parsed = Vec::with_capacity(records.len());
		for raw in &records {
			match Transaction::from_raw(raw, block) {
				Ok(tx) => parsed.push(tx),
				Err(e) => {
					tracing::warn!(block, error = %e, "skipping malformed transaction record");
				}
			}
		}

		let indexed = parsed.len() as u64;
		{
			let mut state = self.state();
			for tx in parsed {
				// Indexed under both keys unconditionally, independent of
				// subscription state; a self-transfer lands twice under the
				// same key.
				state
					.transactions
					.entry(tx.from.clone())
					.or_default()
					.push(tx.clone());
				let to = tx.to.clone();
				state.transactions.entry(to).or_default().push(tx);
			}
		}
		metrics::TRANSACTIONS_INDEXED.inc_by(indexed);
		Ok(())
	}

	/// Acquires the state lock, recovering from a poisoned mutex
	///
	/// The critical sections only perform collection inserts and integer
	/// assignments, so state left behind by a panicking holder is still
	/// consistent.
	fn state(&self) -> MutexGuard<'_, ParserState> {
		self.state.lock().unwrap_or_else(PoisonError::into_inner)
	}
}
