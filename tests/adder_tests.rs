// tests/adder_tests.rs

use qlogic::{
    BitString, Gate, Program, QlogicError, QvmConnection, TruthTable, ripple_carry_adder, verify,
};
use rstest::rstest;

/// Register layout used by these tests: `a` on `0..n`, `b` on `n..2n`,
/// carry in on `2n`, carry out on `2n + 1`.
fn adder_on_low_wires(n: usize) -> Result<Program, QlogicError> {
    let n = n as u64;
    let a: Vec<u64> = (0..n).collect();
    let b: Vec<u64> = (n..2 * n).collect();
    ripple_carry_adder(&a, &b, 2 * n, 2 * n + 1)
}

fn classical_adder_table(n: usize) -> Result<TruthTable, QlogicError> {
    let width = 2 * n + 2;
    TruthTable::from_fn(width, |input| {
        let a = input.slice(0..n).expect("in range").to_index();
        let b = input.slice(n..2 * n).expect("in range").to_index();
        let carry_in = input.bits()[2 * n] as usize;
        let carry_out = input.bits()[2 * n + 1] as usize;
        let total = a + b + carry_in;
        let value = a
            | ((total % (1 << n)) << n)
            | (carry_in << (2 * n))
            | ((carry_out ^ (total >> n)) << (2 * n + 1));
        BitString::from_index(value, width)
    })
}

#[rstest]
#[case::one_bit(1)]
#[case::two_bits(2)]
#[case::three_bits(3)]
fn test_adder_matches_classical_addition(#[case] n: usize) -> Result<(), QlogicError> {
    let qvm = QvmConnection::new();
    let adder = adder_on_low_wires(n)?;
    let expected = classical_adder_table(n)?;
    assert!(expected.is_reversible());
    verify(&qvm, &adder, &expected, 2 * n + 2)
}

#[rstest]
#[case(0, 0, 0, 0)]
#[case(1, 2, 3, 0)]
#[case(3, 3, 2, 1)]
#[case(2, 3, 1, 1)]
fn test_two_bit_sums(
    #[case] a: usize,
    #[case] b: usize,
    #[case] sum: usize,
    #[case] carry: u8,
) -> Result<(), QlogicError> {
    let qvm = QvmConnection::new();
    // a on 0-1, b on 2-3, carry in on 4, carry out on 5
    let mut program = Program::new().inst(Gate::identity(5));
    for bit in 0..2 {
        if (a >> bit) & 1 == 1 {
            program += Gate::x(bit as u64);
        }
        if (b >> bit) & 1 == 1 {
            program += Gate::x(2 + bit as u64);
        }
    }
    program += adder_on_low_wires(2)?;

    let result = qvm.run_and_measure(&program, &[2, 3, 5], 1)?;
    let sum_bits = BitString::from_bits(&result[0][..2])?;
    assert_eq!(sum_bits.to_index(), sum);
    assert_eq!(result[0][2], carry);
    Ok(())
}

#[test]
fn test_adder_on_interleaved_wires_restores_a() -> Result<(), QlogicError> {
    // a = 0b01 on (0, 2), b = 0b11 on (1, 3), carry in 4, carry out 5
    let adder = ripple_carry_adder(&[0, 2], &[1, 3], 4, 5)?;
    let program = Program::new().inst(Gate::x(0)).inst(Gate::x(1)).inst(Gate::x(3)) + adder;
    let result = QvmConnection::new().run_and_measure(&program, &[0, 2, 1, 3, 4, 5], 1)?;
    // a unchanged, b = 1 + 3 = 4 -> 00 with carry out, carry in unchanged
    assert_eq!(result[0], vec![1, 0, 0, 0, 0, 1]);
    Ok(())
}
