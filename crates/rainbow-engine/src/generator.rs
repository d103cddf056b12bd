//! Generator Pool: parallel chain production into a shared table file
//! (component E).

use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;
use rainbow_core::{Chain, HashFunction, RainbowError};
use rainbow_store::TableFile;

use crate::{prng, walker};

/// Local output buffer size before a worker takes the writer lock.
const WORKER_BUFFER: usize = 8192;

/// Generate `chain_num` chains of length `chain_len` under `hash`, appending
/// them to `table`. Spawns `T = max(1, available_parallelism)` workers,
/// partitions the chain count roughly evenly (remainder to the last
/// worker), and joins all of them before returning.
pub fn generate(
    table: TableFile,
    chain_num: u64,
    chain_len: u64,
    hash: Arc<dyn HashFunction>,
) -> Result<(), RainbowError> {
    let workers = thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .max(1);
    let quotas = partition_quota(chain_num, workers);

    let writer = Arc::new(Mutex::new(table));
    let mut handles = Vec::with_capacity(workers);

    for quota in quotas {
        if quota == 0 {
            continue;
        }
        let writer = Arc::clone(&writer);
        let hash = Arc::clone(&hash);
        handles.push(thread::spawn(move || run_worker(quota, chain_len, &hash, &writer)));
    }

    let mut failures = Vec::new();
    for handle in handles {
        match handle.join() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => failures.push(e),
            Err(_) => failures.push(RainbowError::io(
                "worker-panic",
                std::io::Error::other("generator worker panicked"),
            )),
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(RainbowError::WorkerFailure(failures))
    }
}

/// Split `chain_num` chains across `workers` workers: each of the first
/// `workers - 1` gets `chain_num / workers`; the last gets the remainder.
fn partition_quota(chain_num: u64, workers: usize) -> Vec<u64> {
    if workers == 0 {
        return vec![chain_num];
    }
    let base = chain_num / workers as u64;
    let mut quotas = vec![base; workers];
    let assigned: u64 = base * (workers as u64 - 1);
    if let Some(last) = quotas.last_mut() {
        *last = chain_num - assigned;
    }
    quotas
}

fn run_worker(
    quota: u64,
    chain_len: u64,
    hash: &dyn HashFunction,
    writer: &Mutex<TableFile>,
) -> Result<(), RainbowError> {
    let mut buffer = Vec::with_capacity(WORKER_BUFFER);
    let mut produced = 0u64;

    while produced < quota {
        let start = prng::next_u32();
        let end = walker::walk(start, chain_len, hash);
        buffer.push(Chain::new(start, end));
        produced += 1;

        if buffer.len() >= WORKER_BUFFER || produced == quota {
            let mut table = writer.lock();
            table.append(&buffer)?;
            buffer.clear();
        }
    }

    Ok(())
}
