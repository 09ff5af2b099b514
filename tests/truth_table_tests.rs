// tests/truth_table_tests.rs

use qlogic::{
    BitString, Program, QlogicError, QvmConnection, TruthTable, majority_gate, observe_truth_table,
    unmajority_add_gate, unmajority_add_parallel_gate, verify,
};
use rstest::{fixture, rstest};

type Triple = (u8, u8, u8);

const MAJORITY_TABLE: [(Triple, Triple); 8] = [
    ((0, 0, 0), (0, 0, 0)),
    ((0, 0, 1), (1, 1, 0)),
    ((0, 1, 0), (0, 1, 0)),
    ((0, 1, 1), (1, 0, 1)),
    ((1, 0, 0), (1, 0, 0)),
    ((1, 0, 1), (0, 1, 1)),
    ((1, 1, 0), (1, 1, 1)),
    ((1, 1, 1), (0, 0, 1)),
];

const UNMAJORITY_ADD_TABLE: [(Triple, Triple); 8] = [
    ((0, 0, 0), (0, 0, 0)),
    ((0, 0, 1), (1, 1, 1)),
    ((0, 1, 0), (0, 1, 0)),
    ((0, 1, 1), (1, 0, 1)),
    ((1, 0, 0), (1, 1, 0)),
    ((1, 0, 1), (0, 0, 1)),
    ((1, 1, 0), (0, 1, 1)),
    ((1, 1, 1), (1, 0, 0)),
];

const COMPOSITION_TABLE: [(Triple, Triple); 8] = [
    ((0, 0, 0), (0, 0, 0)),
    ((0, 0, 1), (0, 1, 1)),
    ((0, 1, 0), (0, 1, 0)),
    ((0, 1, 1), (0, 0, 1)),
    ((1, 0, 0), (1, 1, 0)),
    ((1, 0, 1), (1, 0, 1)),
    ((1, 1, 0), (1, 0, 0)),
    ((1, 1, 1), (1, 1, 1)),
];

#[fixture]
fn qvm() -> QvmConnection {
    QvmConnection::new()
}

fn table(entries: &[(Triple, Triple)]) -> TruthTable {
    TruthTable::from_triples(entries).expect("literal tables are well formed")
}

fn triple(a: u8, b: u8, c: u8) -> BitString {
    BitString::triple(a, b, c).expect("literal bits are binary")
}

#[rstest]
fn test_majority_gate(qvm: QvmConnection) -> Result<(), QlogicError> {
    verify(&qvm, &majority_gate(0, 1, 2), &table(&MAJORITY_TABLE), 3)
}

#[rstest]
fn test_unmajority_add_gate(qvm: QvmConnection) -> Result<(), QlogicError> {
    verify(&qvm, &unmajority_add_gate(0, 1, 2), &table(&UNMAJORITY_ADD_TABLE), 3)
}

#[rstest]
fn test_unmajority_add_parallel_gate_matches_two_cnot_variant(qvm: QvmConnection) -> Result<(), QlogicError> {
    verify(&qvm, &unmajority_add_parallel_gate(0, 1, 2), &table(&UNMAJORITY_ADD_TABLE), 3)
}

#[rstest]
fn test_composition_of_majority_and_unmajority_gates(qvm: QvmConnection) -> Result<(), QlogicError> {
    let composed = majority_gate(0, 1, 2) + unmajority_add_gate(0, 1, 2);
    verify(&qvm, &composed, &table(&COMPOSITION_TABLE), 3)
}

#[test]
fn test_composition_table_is_functional_composition() -> Result<(), QlogicError> {
    let composed = table(&MAJORITY_TABLE).compose(&table(&UNMAJORITY_ADD_TABLE))?;
    assert_eq!(composed, table(&COMPOSITION_TABLE));
    Ok(())
}

#[rstest]
#[case::majority(&MAJORITY_TABLE)]
#[case::unmajority_add(&UNMAJORITY_ADD_TABLE)]
#[case::composition(&COMPOSITION_TABLE)]
fn test_tables_are_reversible(#[case] entries: &[(Triple, Triple)]) {
    assert!(table(entries).is_reversible());
}

#[rstest]
fn test_observed_tables_match_literals(qvm: QvmConnection) -> Result<(), QlogicError> {
    assert_eq!(observe_truth_table(&qvm, &majority_gate(0, 1, 2), 3)?, table(&MAJORITY_TABLE));
    assert_eq!(observe_truth_table(&qvm, &unmajority_add_gate(0, 1, 2), 3)?, table(&UNMAJORITY_ADD_TABLE));
    Ok(())
}

#[test]
fn test_boundary_and_scenario_entries() {
    let majority = table(&MAJORITY_TABLE);
    let unmajority = table(&UNMAJORITY_ADD_TABLE);
    let composition = table(&COMPOSITION_TABLE);

    // all-zero input is a fixed point
    assert_eq!(majority.get(&triple(0, 0, 0)), Some(&triple(0, 0, 0)));
    assert_eq!(composition.get(&triple(0, 0, 0)), Some(&triple(0, 0, 0)));

    assert_eq!(majority.get(&triple(1, 1, 0)), Some(&triple(1, 1, 1)));
    assert_eq!(unmajority.get(&triple(1, 1, 1)), Some(&triple(1, 0, 0)));
    assert_eq!(composition.get(&triple(1, 1, 0)), Some(&triple(1, 0, 0)));
}

#[rstest]
fn test_majority_then_inverse_is_identity(qvm: QvmConnection) -> Result<(), QlogicError> {
    let maj = majority_gate(0, 1, 2);
    let round_trip = maj.clone() + maj.dagger();
    let identity = TruthTable::from_fn(3, |b| b.clone())?;
    verify(&qvm, &round_trip, &identity, 3)
}

#[rstest]
fn test_wrong_table_fails_at_the_differing_entry(qvm: QvmConnection) {
    let mut entries = MAJORITY_TABLE;
    entries[6] = ((1, 1, 0), (0, 0, 0));
    let result = verify(&qvm, &majority_gate(0, 1, 2), &table(&entries), 3);
    assert_eq!(
        result,
        Err(QlogicError::Mismatch {
            input: triple(1, 1, 0),
            expected: triple(0, 0, 0),
            observed: triple(1, 1, 1),
        })
    );
}

#[rstest]
fn test_gates_on_shifted_positions(qvm: QvmConnection) -> Result<(), QlogicError> {
    // the majority gate on wires (1, 2, 0) is the majority gate with its
    // inputs permuted; wire 0 now plays the role of c
    let shifted = majority_gate(1, 2, 0);
    let expected = TruthTable::from_fn(3, |input| {
        let (a, b, c) = (input.bits()[1], input.bits()[2], input.bits()[0]);
        let maj = (a & b) | (a & c) | (b & c);
        BitString::from_bits(&[maj, a ^ c, b ^ c]).expect("binary")
    })?;
    verify(&qvm, &shifted, &expected, 3)?;
    assert!(verify(&qvm, &Program::new(), &expected, 3).is_err());
    Ok(())
}
