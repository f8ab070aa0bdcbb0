mod symbol;

pub use symbol::{Module, Symbol};

use std::ops::Deref;

use crate::common::{
    bitstream::BitStream,
    codec::encode,
    ec::ecc_per_block,
    error::{QrError, QrResult},
    mask::{apply_best_mask, MaskPattern},
    metadata::{ECLevel, Version},
};

/// Entry point of the crate. Configure with the chained setters, then call
/// [`QrBuilder::build`].
pub struct QrBuilder<'a> {
    data: &'a [u8],
    ec_level: Option<ECLevel>,
    max_version: Version,
    mask: Option<MaskPattern>,
}

impl<'a> QrBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, ec_level: None, max_version: Version::MAX, mask: None }
    }

    pub fn data(&mut self, data: &'a [u8]) -> &mut Self {
        self.data = data;
        self
    }

    /// Pins the error correction level. Without it the strongest level
    /// that fits the resolved version is chosen.
    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = Some(ec_level);
        self
    }

    pub fn unset_ec_level(&mut self) -> &mut Self {
        self.ec_level = None;
        self
    }

    /// Caps the version search. Versions past `max_version` count as out
    /// of capacity.
    pub fn max_version(&mut self, max_version: Version) -> &mut Self {
        self.max_version = max_version;
        self
    }

    /// Pins the mask pattern, skipping penalty evaluation.
    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn metadata(&self) -> String {
        format!(
            "{{ Ec level: {:?}, Max version: {:?}, Mask: {:?} }}",
            self.ec_level, *self.max_version, self.mask
        )
    }
}

#[cfg(test)]
mod qrbuilder_util_tests {
    use super::QrBuilder;
    use crate::common::{ECLevel, Version};

    #[test]
    fn test_metadata() {
        let data = "Hello, world!".as_bytes();
        let mut builder = QrBuilder::new(data);
        builder.ec_level(ECLevel::L).max_version(Version::new(10));
        assert_eq!(
            builder.metadata(),
            "{ Ec level: Some(L), Max version: 10, Mask: None }"
        );
        builder.unset_ec_level();
        assert_eq!(builder.metadata(), "{ Ec level: None, Max version: 10, Mask: None }");
    }
}

impl QrBuilder<'_> {
    pub fn build(&self) -> QrResult<Symbol> {
        println!("\nGenerating QR {}...", self.metadata());

        if let Some(m) = self.mask {
            if *m > 7 {
                return Err(QrError::InvalidMaskPattern);
            }
        }

        // Encode data and resolve version & level
        println!("Encoding data...");
        let (encoded_data, version, ec_level) =
            encode(self.data, self.ec_level, self.max_version)?;

        let total_codewords = version.total_codewords(ec_level);

        println!("Constructing payload with ecc & interleaving...");
        let mut payload = BitStream::new(total_codewords << 3);
        let (data_blocks, ecc_blocks) = Self::compute_ecc(encoded_data.data(), version, ec_level);
        payload.extend(&Self::interleave(&data_blocks));
        payload.extend(&Self::interleave(&ecc_blocks));

        // Construct symbol
        println!("Drawing functional patterns...");
        let mut symbol = Symbol::new(version, ec_level);
        symbol.draw_all_function_patterns();

        println!("Drawing encoding region...");
        symbol.draw_encoding_region(payload);

        match self.mask {
            Some(m) => {
                println!("Applying mask {}...", *m);
                symbol.apply_mask(m);
            }
            None => {
                println!("Finding & applying best mask...");
                apply_best_mask(&mut symbol);
            }
        };

        println!("\x1b[1;32mQR generated successfully!\n \x1b[0m");

        Ok(symbol)
    }

    // Splits the encoded data into blocks and computes the ecc of each
    fn compute_ecc(data: &[u8], version: Version, ec_level: ECLevel) -> (Vec<&[u8]>, Vec<Vec<u8>>) {
        let data_blocks = Self::blockify(data, version, ec_level);

        let ecc_size_per_block = version.ecc_per_block(ec_level);
        let ecc_blocks =
            data_blocks.iter().map(|b| ecc_per_block(b, ecc_size_per_block)).collect::<Vec<_>>();

        (data_blocks, ecc_blocks)
    }

    pub(crate) fn blockify(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<&[u8]> {
        let (block1_size, block1_count, block2_size, block2_count) =
            version.data_codewords_per_block(ec_level);

        let total_blocks = block1_count + block2_count;
        let total_block1_size = block1_size * block1_count;
        let total_size = total_block1_size + block2_size * block2_count;

        debug_assert!(
            total_size == data.len(),
            "Data len doesn't match total size of blocks: Data len {}, Total block size {}",
            data.len(),
            total_size
        );

        let mut data_blocks = Vec::with_capacity(total_blocks);
        data_blocks.extend(data[..total_block1_size].chunks(block1_size));
        if block2_size > 0 {
            data_blocks.extend(data[total_block1_size..].chunks(block2_size));
        }
        data_blocks
    }

    // Round-robin over the blocks; shorter group 1 blocks simply drop out
    // near the end
    pub fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
        let max_block_size = blocks.iter().map(|b| b.len()).max().expect("Blocks is empty");
        let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
        let mut res = Vec::with_capacity(total_size);
        for i in 0..max_block_size {
            for b in blocks {
                if i < b.len() {
                    res.push(b[i]);
                }
            }
        }
        res
    }
}

#[cfg(test)]
mod builder_tests {
    use super::QrBuilder;
    use crate::common::{ECLevel, Version};

    #[test]
    fn test_compute_ecc_simple() {
        let msg = b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11";
        let expected_ecc = [b"\xc4\x23\x27\x77\xeb\xd7\xe7\xe2\x5d\x17"];
        let (_, ecc) = QrBuilder::compute_ecc(msg, Version::new(1), ECLevel::M);
        assert_eq!(&*ecc, expected_ecc);
    }

    #[test]
    fn test_compute_ecc_multi_block() {
        let msg = b"CUF\x86W&U\xc2w2\x06\x12\x06g&\xf6\xf6B\x07v\x86\xf2\x07&V\x16\xc6\xc7\x92\x06\
                    \xb6\xe6\xf7w2\x07v\x86W&R\x06\x86\x972\x07F\xf7vV\xc2\x06\x972\x10\xec\x11\xec\
                    \x11\xec\x11\xec";
        let expected_ecc = [
            b"\xd5\xc7\x0b\x2d\x73\xf7\xf1\xdf\xe5\xf8\x9a\x75\x9a\x6f\x56\xa1\x6f\x27",
            b"\x57\xcc\x60\x3c\xca\xb6\x7c\x9d\xc8\x86\x1b\x81\xd1\x11\xa3\xa3\x78\x85",
            b"\x94\x74\xb1\xd4\x4c\x85\x4b\xf2\xee\x4c\xc3\xe6\xbd\x0a\x6c\xf0\xc0\x8d",
            b"\xeb\x9f\x05\xad\x18\x93\x3b\x21\x6a\x28\xff\xac\x52\x02\x83\x20\xb2\xec",
        ];
        let (_, ecc) = QrBuilder::compute_ecc(msg, Version::new(5), ECLevel::Q);
        assert_eq!(&*ecc, &expected_ecc[..]);
    }

    #[test]
    fn test_blockify_two_groups() {
        // v5-Q splits 62 codewords into 2 blocks of 15 then 2 of 16
        let data = (0u8..62).collect::<Vec<_>>();
        let blocks = QrBuilder::blockify(&data, Version::new(5), ECLevel::Q);
        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks[0].len(), 15);
        assert_eq!(blocks[1].len(), 15);
        assert_eq!(blocks[2].len(), 16);
        assert_eq!(blocks[3].len(), 16);
        assert_eq!(blocks[1][0], 15);
        assert_eq!(blocks[3][15], 61);
    }

    #[test]
    fn test_interleave() {
        let blocks = vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9, 0]];
        let interleaved = QrBuilder::interleave(&blocks);
        let exp_interleaved = vec![1, 4, 7, 2, 5, 8, 3, 6, 9, 0];
        assert_eq!(interleaved, exp_interleaved);
    }

    #[test]
    fn test_build_hello_world() {
        let symbol = QrBuilder::new(b"Hello, world!").ec_level(ECLevel::L).build().unwrap();
        assert_eq!(symbol.version(), Version::new(1));
        assert_eq!(symbol.ec_level(), ECLevel::L);
        assert!(symbol.mask().is_some());
    }

    #[test]
    fn test_build_data_overflow() {
        let data = "1234567890".repeat(300);
        let res = QrBuilder::new(data.as_bytes()).ec_level(ECLevel::H).build();
        assert!(res.is_err());
    }
}
