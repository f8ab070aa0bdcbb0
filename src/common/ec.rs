use super::error::{QrError, QrResult};

// GF(256)
//------------------------------------------------------------------------------

// Reduction polynomial x^8 + x^4 + x^3 + x^2 + 1
const REDUCTION_POLYNOMIAL: u16 = 0b1_0001_1101;

/// GF(256) arithmetic over exponent/log tables. Addition is XOR; multiply
/// and divide go through the log domain. `log[0]` is never consulted.
pub struct GF256 {
    exp: [u8; 256],
    log: [u8; 256],
}

impl GF256 {
    const fn new() -> Self {
        let mut exp = [0u8; 256];
        let mut log = [0u8; 256];
        let mut value: u16 = 1;
        let mut i = 0;
        while i < 256 {
            exp[i] = value as u8;
            if i < 255 {
                log[value as usize] = i as u8;
            }
            value <<= 1;
            if value > 255 {
                value ^= REDUCTION_POLYNOMIAL;
            }
            i += 1;
        }
        Self { exp, log }
    }

    // Power of the primitive element, alpha^0 = 1
    pub fn alpha_pow(&self, i: usize) -> u8 {
        self.exp[i % 255]
    }

    pub fn multiply(&self, a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        let log_sum = self.log[a as usize] as usize + self.log[b as usize] as usize;
        self.exp[log_sum % 255]
    }

    pub fn divide(&self, a: u8, b: u8) -> QrResult<u8> {
        if b == 0 {
            return Err(QrError::DivisionByZero);
        }
        if a == 0 {
            return Ok(0);
        }
        let log_diff = 255 + self.log[a as usize] as usize - self.log[b as usize] as usize;
        Ok(self.exp[log_diff % 255])
    }

    /// Multiplies two polynomials whose coefficients are ordered highest
    /// degree first. Cross terms accumulate with XOR.
    pub fn multiply_polynomials(&self, p: &[u8], q: &[u8]) -> Vec<u8> {
        let mut res = vec![0u8; p.len() + q.len() - 1];
        for (i, &a) in p.iter().enumerate() {
            for (j, &b) in q.iter().enumerate() {
                res[i + j] ^= self.multiply(a, b);
            }
        }
        res
    }
}

pub static GF: GF256 = GF256::new();

// Reed-Solomon encoder
//------------------------------------------------------------------------------

/// Builds the degree-`ecc_count` generator polynomial, the product of
/// (x - alpha^i) for i in 0..ecc_count. Coefficients ordered highest degree
/// first, so the result has `ecc_count + 1` of them.
pub fn generator_polynomial(ecc_count: usize) -> Vec<u8> {
    debug_assert!(ecc_count >= 1, "Generator polynomial needs at least one root");

    let mut gen = vec![1, GF.alpha_pow(0)];
    for i in 1..ecc_count {
        gen = GF.multiply_polynomials(&gen, &[1, GF.alpha_pow(i)]);
    }
    gen
}

// Performs polynomial long division of the zero-extended data block by the
// generator polynomial; the remainder coefficients are the ecc
pub fn ecc_per_block(block: &[u8], ecc_count: usize) -> Vec<u8> {
    let len = block.len();
    let gen = generator_polynomial(ecc_count);

    let mut res = block.to_vec();
    res.resize(len + ecc_count, 0);

    for i in 0..len {
        let lead_coeff = res[i];
        if lead_coeff == 0 {
            continue;
        }
        for (j, &g) in gen.iter().enumerate() {
            res[i + j] ^= GF.multiply(g, lead_coeff);
        }
    }

    res.split_off(len)
}


#[cfg(test)]
mod rs_tests {
    use proptest::prelude::*;

    use super::{ecc_per_block, generator_polynomial, GF};

    // Divides dividend by gen in place and returns the remainder
    fn poly_mod(mut dividend: Vec<u8>, gen: &[u8]) -> Vec<u8> {
        let n = gen.len() - 1;
        for i in 0..dividend.len() - n {
            let lead_coeff = dividend[i];
            if lead_coeff == 0 {
                continue;
            }
            for (j, &g) in gen.iter().enumerate() {
                dividend[i + j] ^= GF.multiply(g, lead_coeff);
            }
        }
        let at = dividend.len() - n;
        dividend.split_off(at)
    }

    #[test]
    fn test_generator_degree() {
        for n in 1..=68 {
            assert_eq!(generator_polynomial(n).len(), n + 1);
        }
    }

    #[test]
    fn test_generator_polynomial_7() {
        assert_eq!(generator_polynomial(7), vec![1, 127, 122, 154, 164, 11, 68, 117]);
    }

    #[test]
    fn test_ecc_per_block_1() {
        let res = ecc_per_block(b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11", 10);
        assert_eq!(&*res, b"\xc4#'w\xeb\xd7\xe7\xe2]\x17");
    }

    #[test]
    fn test_ecc_per_block_2() {
        let res = ecc_per_block(b" [\x0bx\xd1r\xdcMC@\xec\x11\xec", 13);
        assert_eq!(&*res, b"\xa8H\x16R\xd96\x9c\x00.\x0f\xb4z\x10");
    }

    #[test]
    fn test_ecc_per_block_3() {
        let res = ecc_per_block(b"CUF\x86W&U\xc2w2\x06\x12\x06g&", 18);
        assert_eq!(&*res, b"\xd5\xc7\x0b-s\xf7\xf1\xdf\xe5\xf8\x9au\x9aoV\xa1o'");
    }

    proptest! {
        // Systematic property: data followed by its ecc is divisible by
        // the generator polynomial
        #[test]
        fn proptest_rs_zero_remainder(
            data in prop::collection::vec(0..=255u8, 1..=64),
            ecc_count in 1..=30usize,
        ) {
            let ecc = ecc_per_block(&data, ecc_count);
            prop_assert_eq!(ecc.len(), ecc_count);

            let mut codeword = data.clone();
            codeword.extend_from_slice(&ecc);
            let rem = poly_mod(codeword, &generator_polynomial(ecc_count));
            prop_assert!(rem.iter().all(|&c| c == 0));
        }
    }
}
