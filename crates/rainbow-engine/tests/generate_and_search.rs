use std::sync::Arc;

use rainbow_core::{HashFunction, Scratch};
use rainbow_engine::{generate, lookup, LookupResult};
use rainbow_hashes::WikiHash;
use rainbow_store::{ReadTable, TableFile, WriteTable};

#[test]
fn generate_sort_and_find_every_start_point() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wikihash.300.25.0.rt");
    let chain_len = 25u64;
    let chain_num = 300u64;

    let table = TableFile::create_empty(&path).unwrap();
    let hash: Arc<dyn HashFunction> = Arc::new(WikiHash);
    generate(table, chain_num, chain_len, Arc::clone(&hash)).unwrap();

    assert_eq!(std::fs::metadata(&path).unwrap().len(), chain_num * 8);

    {
        let mut write = WriteTable::open(&path).unwrap();
        rainbow_store::sort_by_end(write.as_chains_mut());
        write.flush().unwrap();
    }

    let read = ReadTable::open(&path).unwrap();
    let chains = read.as_chains();
    assert_eq!(chains.len(), chain_num as usize);
    assert!(chains.windows(2).all(|w| w[0].end <= w[1].end));

    let sample_starts: Vec<u32> = chains.iter().take(5).map(|c| c.start).collect();
    for start in sample_starts {
        let mut scratch: Scratch = [0u8; 64];
        let digest = hash.hash(start, &mut scratch).to_vec();
        let result = lookup(chains, chain_len, hash.as_ref(), &digest);
        assert_eq!(result, LookupResult::Found(start));
    }
}
