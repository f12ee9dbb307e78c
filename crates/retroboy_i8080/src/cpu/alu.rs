use super::Cpu;
use crate::io::IoPorts;

impl<P: IoPorts> Cpu<P> {
    /// Compute `a + b + carry_in` and set all five flags from it.
    ///
    /// AC is the carry out of bit 3 and CY the carry out of bit 7.
    pub(super) fn sum_flags(&mut self, a: u8, b: u8, carry_in: bool) -> u8 {
        let carry = u8::from(carry_in);
        let full = u16::from(a) + u16::from(b) + u16::from(carry);
        let result = full as u8;
        self.flags.ac = (a & 0x0f) + (b & 0x0f) + carry > 0x0f;
        self.flags.cy = full > 0xff;
        self.flags.set_zsp(result);
        result
    }

    /// Compute `a - b - borrow_in` and set all five flags from it.
    ///
    /// The 8080 subtracts by adding the complement, `a + !b + !borrow_in`.
    /// AC is the carry out of bit 3 of that addition and CY is set when the
    /// addition does not carry out of bit 7 (a borrow occurred).
    pub(super) fn diff_flags(&mut self, a: u8, b: u8, borrow_in: bool) -> u8 {
        let result = self.sum_flags(a, !b, !borrow_in);
        self.flags.cy = !self.flags.cy;
        result
    }

    /// ADD/ADC. `use_carry` selects ADC.
    pub(super) fn alu_add(&mut self, value: u8, use_carry: bool) {
        let carry = use_carry && self.flags.cy;
        self.regs.a = self.sum_flags(self.regs.a, value, carry);
    }

    /// SUB/SBB. `use_carry` selects SBB.
    pub(super) fn alu_sub(&mut self, value: u8, use_carry: bool) {
        let borrow = use_carry && self.flags.cy;
        self.regs.a = self.diff_flags(self.regs.a, value, borrow);
    }

    /// ANA/ANI. CY is cleared; AC takes the OR of bit 3 of both operands.
    pub(super) fn alu_and(&mut self, value: u8) {
        let a = self.regs.a;
        let result = a & value;
        self.flags.cy = false;
        self.flags.ac = (a | value) & 0x08 != 0;
        self.flags.set_zsp(result);
        self.regs.a = result;
    }

    pub(super) fn alu_xor(&mut self, value: u8) {
        let result = self.regs.a ^ value;
        self.flags.cy = false;
        self.flags.ac = false;
        self.flags.set_zsp(result);
        self.regs.a = result;
    }

    pub(super) fn alu_or(&mut self, value: u8) {
        let result = self.regs.a | value;
        self.flags.cy = false;
        self.flags.ac = false;
        self.flags.set_zsp(result);
        self.regs.a = result;
    }

    /// CMP/CPI: flags as for `A - value`, A unchanged.
    pub(super) fn alu_cmp(&mut self, value: u8) {
        self.diff_flags(self.regs.a, value, false);
    }

    /// INR: Z, S, P and AC from `value + 1`. CY is not affected.
    pub(super) fn alu_inr(&mut self, value: u8) -> u8 {
        let carry = self.flags.cy;
        let result = self.sum_flags(value, 1, false);
        self.flags.cy = carry;
        result
    }

    /// DCR: Z, S, P and AC from `value - 1`. CY is not affected.
    pub(super) fn alu_dcr(&mut self, value: u8) -> u8 {
        let carry = self.flags.cy;
        let result = self.diff_flags(value, 1, false);
        self.flags.cy = carry;
        result
    }

    /// DAD: HL += value. Only CY is affected.
    pub(super) fn alu_dad(&mut self, value: u16) {
        let (result, carry) = self.regs.hl().overflowing_add(value);
        self.flags.cy = carry;
        self.regs.set_hl(result);
    }

    /// DAA: turn the accumulator into packed BCD after an addition.
    ///
    /// Both corrections are folded into a single addition so Z, S, P and AC
    /// come from it. CY is set when the high digit was corrected and is
    /// otherwise left as it was.
    pub(super) fn alu_daa(&mut self) {
        let a = self.regs.a;
        let low = a & 0x0f;
        let high = a >> 4;
        let mut carry = self.flags.cy;
        let mut correction = 0u8;

        if low > 9 || self.flags.ac {
            correction |= 0x06;
        }
        // A low-digit fix on a high digit of 9 carries into it and pushes it
        // past 9 as well.
        if high > 9 || self.flags.cy || (high >= 9 && low > 9) {
            correction |= 0x60;
            carry = true;
        }

        self.regs.a = self.sum_flags(a, correction, false);
        self.flags.cy = carry;
    }
}
