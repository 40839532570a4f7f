use thiserror::Error;

/// Human-readable form of the efficiency definition, printed alongside reports.
pub const FORMULA: &str = "LE = 10 * score / (number of heavy atoms)";

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum EfficiencyError {
    #[error("Number of heavy atoms must be at least 1 (got {0})")]
    InvalidAtomCount(u8),
}

/// Ligand efficiency, `10 * score / heavy_atoms`.
///
/// Docking scores are negative for binders, so the efficiency is negative as well and
/// typically falls between -6 and 0; lower is better, as for the raw score.
///
/// # Errors
///
/// Returns [`EfficiencyError::InvalidAtomCount`] when `heavy_atoms` is zero.
pub fn ligand_efficiency(score: f32, heavy_atoms: u8) -> Result<f32, EfficiencyError> {
    if heavy_atoms < 1 {
        return Err(EfficiencyError::InvalidAtomCount(heavy_atoms));
    }
    Ok(10.0 * score / f32::from(heavy_atoms))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-5, "{a} != {b}");
    }

    #[test]
    fn zero_heavy_atoms_is_rejected() {
        assert_eq!(
            ligand_efficiency(-9.2, 0),
            Err(EfficiencyError::InvalidAtomCount(0))
        );
    }

    #[test]
    fn efficiency_scales_score_by_atom_count() {
        assert_close(ligand_efficiency(-9.2, 20).unwrap(), -4.6);
        assert_close(ligand_efficiency(-8.0, 1).unwrap(), -80.0);
        assert_close(ligand_efficiency(-7.5, 255).unwrap(), -75.0 / 255.0);
    }

    #[test]
    fn identical_inputs_give_identical_outputs() {
        let a = ligand_efficiency(-10.3, 31).unwrap();
        let b = ligand_efficiency(-10.3, 31).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }
}
