/// Condition flags for the Intel 8080.
///
/// Packed into the low byte of the PSW word as `S Z 0 AC 0 P 1 CY`
/// (bit 7 down to bit 0).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flags {
    pub z: bool,  // zero
    pub s: bool,  // sign
    pub p: bool,  // parity (even)
    pub cy: bool, // carry
    pub ac: bool, // auxiliary carry
}

impl Flags {
    const S: u8 = 0x80;
    const Z: u8 = 0x40;
    const AC: u8 = 0x10;
    const P: u8 = 0x04;
    const ALWAYS_ONE: u8 = 0x02;
    const CY: u8 = 0x01;

    pub fn to_u8(self) -> u8 {
        let mut f = Self::ALWAYS_ONE;
        if self.s {
            f |= Self::S;
        }
        if self.z {
            f |= Self::Z;
        }
        if self.ac {
            f |= Self::AC;
        }
        if self.p {
            f |= Self::P;
        }
        if self.cy {
            f |= Self::CY;
        }
        f
    }

    /// Unpack a PSW flag byte. Bits 1, 3 and 5 are ignored.
    pub fn from_u8(v: u8) -> Self {
        Self {
            s: v & Self::S != 0,
            z: v & Self::Z != 0,
            ac: v & Self::AC != 0,
            p: v & Self::P != 0,
            cy: v & Self::CY != 0,
        }
    }

    /// Set Z, S and P from a result byte.
    #[inline]
    pub(crate) fn set_zsp(&mut self, value: u8) {
        self.z = value == 0;
        self.s = value & 0x80 != 0;
        self.p = parity(value);
    }
}

/// Even parity: true when `value` has an even number of set bits.
#[inline]
pub fn parity(value: u8) -> bool {
    value.count_ones() % 2 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn psw_constant_bits() {
        assert_eq!(Flags::default().to_u8(), 0x02);
        let all = Flags {
            z: true,
            s: true,
            p: true,
            cy: true,
            ac: true,
        };
        assert_eq!(all.to_u8(), 0xd7);
    }

    #[test]
    fn psw_unpack_ignores_fixed_bits() {
        let f = Flags::from_u8(0xff);
        assert_eq!(f.to_u8(), 0xd7);
        assert_eq!(Flags::from_u8(0x2a), Flags::default());
    }

    #[test]
    fn parity_matches_population_count() {
        assert!(parity(0x00));
        assert!(!parity(0x01));
        assert!(parity(0x03));
        assert!(!parity(0x07));
        assert!(parity(0xff));
        for v in 0..=255u8 {
            let mut bits = 0;
            for i in 0..8 {
                bits += (v >> i) & 1;
            }
            assert_eq!(parity(v), bits % 2 == 0, "value {v:#04x}");
        }
    }
}
