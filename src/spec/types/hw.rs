use static_assertions::const_assert;

pub type Byte = u8;

pub const BYTE_WIDTH: u32 = 8;
pub const BYTE_MAX: Byte = 0xFF;

/*
    Payload bytes which carry register indices are split as 0bFFHHHLLL:

        FF  - the "form" of the operand list (see the `FORM_*` constants),
        HHH - the high register field,
        LLL - the low register field.

    Forms which only carry one register let it occupy the whole of HHHLLL.
*/
pub const REG_FIELD_WIDTH: u32 = 3;
pub const FORM_WIDTH: u32 = 2;
pub const FORM_SHIFT: u32 = 2 * REG_FIELD_WIDTH;

const_assert!(FORM_SHIFT + FORM_WIDTH == BYTE_WIDTH);

pub const REG_FIELD_MASK: Byte = (1 << REG_FIELD_WIDTH) - 1;
pub const FORM_BODY_MASK: Byte = (1 << FORM_SHIFT) - 1;

// Form prefixes, already shifted into position.
pub const FORM_ACC: Byte = 0b00 << FORM_SHIFT;
pub const FORM_UNARY: Byte = 0b01 << FORM_SHIFT;
pub const FORM_REG: Byte = 0b10 << FORM_SHIFT;
pub const FORM_LIT: Byte = 0b11 << FORM_SHIFT;

pub const fn form_of(b: Byte) -> Byte {
    b & !FORM_BODY_MASK
}

pub const fn form_body(b: Byte) -> Byte {
    b & FORM_BODY_MASK
}

/// Packs two register indices as `form + hi * 8 + lo`. Out-of-field values
/// wrap around within the byte rather than being rejected.
pub fn pack_regs(form: Byte, hi: Byte, lo: Byte) -> Byte {
    form.wrapping_add(hi.wrapping_shl(REG_FIELD_WIDTH))
        .wrapping_add(lo)
}

pub fn unpack_regs(b: Byte) -> (Byte, Byte) {
    (
        (b >> REG_FIELD_WIDTH) & REG_FIELD_MASK,
        b & REG_FIELD_MASK,
    )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn pack_matches_arithmetic_form() {
        assert_eq!(pack_regs(FORM_REG, 3, 2), 0x80 + 3 * 8 + 2);
        assert_eq!(pack_regs(FORM_LIT, 1, 7), 0xC0 + 8 + 7);
        assert_eq!(pack_regs(FORM_ACC, 2, 5), 21);
    }

    #[test]
    fn pack_wraps_instead_of_overflowing() {
        // 0x80 + 0x20 * 8 == 0x180, which wraps to 0x80
        assert_eq!(pack_regs(FORM_REG, 0x20, 0), 0x80);
        assert_eq!(pack_regs(FORM_LIT, 0, 0x45), 0x05);
    }

    #[test]
    fn unpack_inverts_pack() {
        let b = pack_regs(FORM_REG, 6, 1);
        assert_eq!(form_of(b), FORM_REG);
        assert_eq!(unpack_regs(b), (6, 1));
        assert_eq!(form_body(0xC5), 0x05);
    }
}
