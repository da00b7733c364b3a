#![no_main]
use libfuzzer_sys::fuzz_target;
use slaterbits::BitDeterminant;

fuzz_target!(|data: (Vec<bool>, Vec<(u8, u8, u8, u8, u8)>)| {
    let (occupation, ops) = data;
    let size = occupation.len() / 2;
    if size == 0 || size > slaterbits::MAX_ORBITALS {
        return;
    }
    let mut det = match BitDeterminant::from_occupation(&occupation[..2 * size]) {
        Ok(det) => det,
        Err(_) => return,
    };
    let na = det.count_alfa();
    let nb = det.count_beta();

    for (op, i, j, a, b) in ops {
        let (i, j, a, b) = (i as usize, j as usize, a as usize, b as usize);
        let before = det;
        let result = match op % 5 {
            0 => det.single_excitation_a(i, a),
            1 => det.single_excitation_b(i, a),
            2 => det.double_excitation_aa(i, j, a, b),
            3 => det.double_excitation_bb(i, j, a, b),
            _ => det.double_excitation_ab(i, j, a, b),
        };
        match result {
            Ok(sign) => {
                assert!(sign == 1.0 || sign == -1.0 || sign == 0.0);
                if sign == 0.0 {
                    assert_eq!(det, before);
                }
            }
            Err(_) => assert_eq!(det, before),
        }
        // Excitations conserve particle number and never touch bits beyond `size`.
        assert_eq!(det.count_alfa(), na);
        assert_eq!(det.count_beta(), nb);
        assert_eq!(det.alfa().count(), na);
        assert_eq!(det.beta().count(), nb);
        assert_eq!(det.spin2(&before).unwrap(), before.spin2(&det).unwrap());
    }

    // S² never connects different particle numbers.
    let mut ionized = det;
    if let Some(&i) = det.get_alfa_occ().first() {
        assert_ne!(ionized.destroy_alfa(i).unwrap(), 0.0);
        assert_eq!(det.spin2(&ionized).unwrap(), 0.0);
        assert_eq!(ionized.spin2(&det).unwrap(), 0.0);
    }
});
