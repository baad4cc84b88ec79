#![no_main]

use std::io::{self, Read};

use libfuzzer_sys::fuzz_target;
use rechunkrs::{RechunkConfig, Rechunker};

/// Reader returning short reads of varying length.
struct ShortReader<'a> {
    data: &'a [u8],
    step: usize,
}

impl Read for ShortReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.step.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        self.step = self.step % 97 + 1;
        Ok(n)
    }
}

fuzz_target!(|input: (u8, u8, Vec<u8>)| {
    let (chunk_size, read_size, data) = input;
    let config = RechunkConfig::new(usize::from(chunk_size) + 1)
        .unwrap()
        .with_read_buffer_size(usize::from(read_size) + 1);

    let reader = ShortReader {
        data: &data,
        step: 1,
    };
    let chunks: Vec<_> = Rechunker::new(config)
        .unwrap()
        .rechunk(reader)
        .collect::<Result<_, _>>()
        .unwrap();

    let joined: Vec<u8> = chunks.iter().flat_map(|c| c.data.to_vec()).collect();
    assert_eq!(joined, data);
    assert_eq!(
        chunks,
        rechunkrs::rechunk_bytes(config.chunk_size(), &data).unwrap()
    );
});
