#![no_main]

use libfuzzer_sys::fuzz_target;
use rechunkrs::{Rechunker, digest_chunks};

fuzz_target!(|input: (u16, Vec<u8>, Vec<u8>)| {
    let (chunk_size, data, splits) = input;
    let chunk_size = usize::from(chunk_size % 4096) + 1;

    // Cut the data into blocks whose sizes come from `splits`
    let mut blocks = Vec::new();
    let mut rest = &data[..];
    for &s in &splits {
        let n = usize::from(s).min(rest.len());
        let (block, tail) = rest.split_at(n);
        blocks.push(block);
        rest = tail;
    }
    blocks.push(rest);

    let mut rechunker = Rechunker::with_chunk_size(chunk_size).unwrap();
    let mut chunks = Vec::new();
    for block in blocks {
        chunks.extend(rechunker.ingest(block).unwrap());
    }
    chunks.extend(rechunker.finish());

    // Verify: sizes
    if let Some((last, full)) = chunks.split_last() {
        assert!(full.iter().all(|c| c.len() == chunk_size));
        assert!(!last.is_empty() && last.len() <= chunk_size);
    }

    // Verify: content and offsets
    let mut expected_offset = 0u64;
    for (i, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.index, i as u64);
        assert_eq!(chunk.offset, expected_offset);
        expected_offset += chunk.len() as u64;
    }
    assert_eq!(expected_offset, data.len() as u64);

    let reference = rechunkrs::rechunk_bytes(chunk_size, &data).unwrap();
    assert_eq!(chunks, reference);
    assert_eq!(digest_chunks(&chunks), digest_chunks(&reference));
});
