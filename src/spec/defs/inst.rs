use super::opcode::*;
use crate::spec::{
    isa::Builder,
    types::schema::{InstDef, InstKind, Layout, OperandKinds},
};

const ACC: OperandKinds = OperandKinds::ACCUMULATOR;
const REG: OperandKinds = OperandKinds::REGISTER;
const LIT: OperandKinds = OperandKinds::LITERAL;

// Registration order matters: lookups return the first match.

fn gen_ctl(builder: &mut Builder) {
    builder.register(InstDef::with_0(InstKind::Nop, "NOP", I_NOP));
}

fn gen_data(builder: &mut Builder) {
    builder.register(InstDef::with_1(
        InstKind::LoadAccumulator,
        "LDA",
        I_LDA,
        LIT,
        Layout::Immediate,
    ));

    builder.register(InstDef::with_1(
        InstKind::Move,
        "MV",
        I_MV,
        REG,
        Layout::MoveUnary,
    ));
    builder.register(InstDef::with_2(
        InstKind::Move,
        "MV",
        I_MV,
        REG,
        ACC | REG | LIT,
        Layout::Move,
    ));
}

fn gen_alu(builder: &mut Builder) {
    builder.register(InstDef::with_2(
        InstKind::Add,
        "ADD",
        I_ADD,
        REG | ACC,
        REG | LIT,
        Layout::Arith,
    ));
    builder.register(InstDef::with_2(
        InstKind::Subtract,
        "SUB",
        I_SUB,
        REG | ACC,
        REG | LIT,
        Layout::Arith,
    ));

    builder.register(InstDef::with_0(InstKind::Increment, "INC", I_INC));
    builder.register(InstDef::with_0(InstKind::Decrement, "DEC", I_DEC));
}

fn gen_jmp(builder: &mut Builder) {
    builder.register(InstDef::with_1(
        InstKind::Jump,
        "JMP",
        I_JMP,
        REG | ACC,
        Layout::Jump,
    ));
    builder.register(InstDef::with_2(
        InstKind::JumpIfZero,
        "JFZ",
        I_JFZ,
        REG | ACC,
        REG,
        Layout::JumpIfZero,
    ));
}

fn gen_io(builder: &mut Builder) {
    builder.register(InstDef::with_2(
        InstKind::Input,
        "IN",
        I_IN,
        REG,
        REG,
        Layout::Port,
    ));
    builder.register(InstDef::with_2(
        InstKind::Output,
        "OUT",
        I_OUT,
        REG,
        REG,
        Layout::Port,
    ));
}

fn gen_stk(builder: &mut Builder) {
    builder.register(InstDef::with_1(
        InstKind::Push,
        "PUSH",
        I_PUSH,
        REG | ACC,
        Layout::Push,
    ));
    builder.register(InstDef::with_1(
        InstKind::Pop,
        "POP",
        I_POP,
        REG | ACC,
        Layout::Pop,
    ));
}

fn gen_sys(builder: &mut Builder) {
    builder.register(InstDef::with_0(InstKind::Halt, "HLT", I_HLT));
}

pub(crate) fn register(builder: &mut Builder) {
    gen_ctl(builder);
    gen_data(builder);
    gen_alu(builder);
    gen_jmp(builder);
    gen_io(builder);
    gen_stk(builder);
    gen_sys(builder);
}
