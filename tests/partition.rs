mod common;

use cneo::{get_default_nuclear_basis, Partitioner};
use common::hcn;

#[test]
fn test_hcn_quantum_proton_end_to_end() {
    let mut mol = hcn();
    mol.set_quantum_nuclei(&[0]).unwrap();

    let partitioner = Partitioner::new(get_default_nuclear_basis());
    let systems = partitioner.partition(&mol).unwrap();

    // Electron subsystem: proton charge zeroed, net charge dropped by one.
    assert_eq!(systems.electron.charge, mol.charge - 1);
    assert_eq!(systems.electron.atom_charge(0), 0.0);
    assert_eq!(systems.electron.atom_charge(1), 6.0);
    assert_eq!(systems.electron.atom_charge(2), 7.0);
    assert_eq!(systems.electron.num_electrons(), 15);

    // Nuclear subsystem: classical charges zeroed, net charge absolute.
    assert_eq!(systems.nuclear.charge, 1);
    assert_eq!(systems.nuclear.atom_charge(0), 1.0);
    assert_eq!(systems.nuclear.atom_charge(1), 0.0);
    assert_eq!(systems.nuclear.atom_charge(2), 0.0);

    // The proton carries the 8s8p8d even-tempered set: 8 + 24 + 40 functions.
    let basis = systems.nuclear.basis.as_ref().unwrap();
    assert_eq!(basis.nao(), 72);
    let slice = basis.ao_slice(0);
    assert_eq!((slice.ao0, slice.ao1), (0, 72));
    assert_eq!(basis.ao_slice(1).nao(), 0);
    assert_eq!(basis.ao_slice(2).nao(), 0);

    let alpha = 2.0 * 2.0f64.sqrt();
    let beta = 2.0f64.sqrt();
    let shells = basis.shells(0);
    assert_eq!(shells.len(), 24);
    for l in 0..3u8 {
        for i in 0..8usize {
            let shell = shells[usize::from(l) * 8 + i];
            assert_eq!(shell.l, l);
            let expected = alpha * beta.powi(i as i32);
            assert!(
                (shell.exponent - expected).abs() < 1e-12,
                "shell ({l}, {i}) exponent {} != {expected}",
                shell.exponent
            );
        }
    }
}

#[test]
fn test_empty_quantum_list_keeps_original_charge() {
    let mut mol = hcn();
    mol.charge = 1;
    mol.set_quantum_nuclei(&[]).unwrap();

    let partitioner = Partitioner::new(get_default_nuclear_basis());
    let systems = partitioner.partition(&mol).unwrap();

    assert_eq!(systems.electron.charge, 1);
    assert_eq!(systems.nuclear.charge, 0);
    assert_eq!(systems.nuclear.basis.as_ref().unwrap().nao(), 0);
    for i in 0..mol.natm() {
        assert_eq!(systems.electron.atom_charge(i), mol.atom_charge(i));
        assert_eq!(systems.nuclear.atom_charge(i), 0.0);
    }
}

#[test]
fn test_quantum_flag_round_trip() {
    let mut mol = hcn();
    mol.set_quantum_nuclei(&[]).unwrap();
    mol.set_quantum_nuclei(&[0]).unwrap();
    assert_eq!(mol.quantum_flags(), &[true, false, false]);
}

#[test]
fn test_two_quantum_protons_hydrogen_molecule() {
    let mut mol = cneo::Molecule::new(
        vec![
            cneo::Atom::new(1, [0.0, 0.0, 0.0]),
            cneo::Atom::new(1, [0.0, 0.0, 1.4]),
        ],
        0,
    );
    mol.set_quantum_nuclei(&[0, 1]).unwrap();

    let partitioner = Partitioner::new(get_default_nuclear_basis());
    let systems = partitioner.partition(&mol).unwrap();

    assert_eq!(systems.electron.charge, -2);
    assert_eq!(systems.nuclear.charge, 2);

    let basis = systems.nuclear.basis.as_ref().unwrap();
    assert_eq!(basis.nao(), 144);
    let s1 = basis.ao_slice(1);
    assert_eq!((s1.ao0, s1.ao1), (72, 144));

    // With every nucleus quantum, no classical repulsion remains.
    assert_eq!(mol.classical_nuclear_repulsion(), 0.0);
}
