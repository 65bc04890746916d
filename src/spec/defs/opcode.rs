use crate::spec::types::hw::Byte;

/*
    Leading opcode byte of every instruction. Variants of one instruction
    (e.g. the 1- and 2-operand MV) share an opcode and are told apart by
    their payload form.

    INC/DEC have the high bit set because they carry no payload at all.
*/

#[rustfmt::skip] pub const I_NOP : Byte = 0b0000_0000;
#[rustfmt::skip] pub const I_LDA : Byte = 0b0000_0001;
#[rustfmt::skip] pub const I_IN  : Byte = 0b0000_0101;
#[rustfmt::skip] pub const I_OUT : Byte = 0b0000_0110;
#[rustfmt::skip] pub const I_JMP : Byte = 0b0000_0111;
#[rustfmt::skip] pub const I_JFZ : Byte = 0b0000_1000;
#[rustfmt::skip] pub const I_PUSH: Byte = 0b0000_1001;
#[rustfmt::skip] pub const I_POP : Byte = 0b0000_1010;
#[rustfmt::skip] pub const I_MV  : Byte = 0b0001_0010;
#[rustfmt::skip] pub const I_ADD : Byte = 0b0001_0011;
#[rustfmt::skip] pub const I_SUB : Byte = 0b0001_0100;
#[rustfmt::skip] pub const I_INC : Byte = 0b1000_0101;
#[rustfmt::skip] pub const I_DEC : Byte = 0b1000_0110;
#[rustfmt::skip] pub const I_HLT : Byte = 0b1111_1111;
