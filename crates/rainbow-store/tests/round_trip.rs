use rainbow_core::Chain;
use rainbow_store::{binary_search_first, sort_by_end, ReadTable, TableFile, WriteTable};

#[test]
fn write_sort_then_search_via_mmap() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wikihash.1000.100.0.rt");

    {
        let mut table = TableFile::create_empty(&path).unwrap();
        table
            .append(&[
                Chain::new(10, 200),
                Chain::new(11, 100),
                Chain::new(12, 300),
                Chain::new(13, 100),
            ])
            .unwrap();
    }

    {
        let mut write = WriteTable::open(&path).unwrap();
        sort_by_end(write.as_chains_mut());
        write.flush().unwrap();
    }

    let read = ReadTable::open(&path).unwrap();
    let chains = read.as_chains();
    let ends: Vec<u32> = chains.iter().map(|c| c.end).collect();
    assert_eq!(ends, vec![100, 100, 200, 300]);

    let idx = binary_search_first(chains, 100).unwrap();
    assert_eq!(idx, 0);
    assert_eq!(chains[idx].end, 100);
}
