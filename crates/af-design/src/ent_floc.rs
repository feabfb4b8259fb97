//! Entrance tank + flocculator assembly.
//!
//! The two units share one (flow, temperature) operating point and a
//! geometric coupling: the entrance tank sits inside the head of the first
//! flocculator channel, so its length is subtracted from the serpentine.

use serde::{Deserialize, Serialize};

use af_core::units::{Flow, Temperature, celsius, lps};

use crate::ent::{EntranceTank, EntranceTankParams, EntranceTankReport};
use crate::error::DesignResult;
use crate::floc::{Flocculator, FlocculatorParams, FlocculatorReport};

/// Inputs for [`EntTankFloc`]: the shared operating point plus
/// per-subcomponent overrides. The subcomponent `q`, `temp`, and
/// `ent_l` fields are ignored and rewritten during construction.
#[derive(Debug, Clone, Copy)]
pub struct EntTankFlocParams {
    pub q: Flow,
    pub temp: Temperature,
    pub ent: EntranceTankParams,
    pub floc: FlocculatorParams,
}

impl Default for EntTankFlocParams {
    fn default() -> Self {
        Self {
            q: lps(20.0),
            temp: celsius(20.0),
            ent: EntranceTankParams::default(),
            floc: FlocculatorParams::default(),
        }
    }
}

/// The assembled train. Ownership is strictly tree-shaped: each
/// subcomponent is a plain field with its own cache.
#[derive(Debug)]
pub struct EntTankFloc {
    pub ent: EntranceTank,
    pub floc: Flocculator,
}

impl EntTankFloc {
    /// Builds the entrance tank first and feeds its computed length to the
    /// flocculator as the upstream channel length.
    pub fn new(params: EntTankFlocParams) -> DesignResult<Self> {
        let ent = EntranceTank::new(EntranceTankParams {
            q: params.q,
            temp: params.temp,
            ..params.ent
        });
        let ent_l = ent.l()?;
        let floc = Flocculator::new(FlocculatorParams {
            q: params.q,
            temp: params.temp,
            ent_l,
            ..params.floc
        });
        Ok(Self { ent, floc })
    }

    pub fn report(&self) -> DesignResult<EntTankFlocReport> {
        Ok(EntTankFlocReport {
            ent: self.ent.report()?,
            floc: self.floc.report()?,
        })
    }
}

/// Nested report for the assembled train.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntTankFlocReport {
    pub ent: EntranceTankReport,
    pub floc: FlocculatorReport,
}

#[cfg(test)]
mod tests {
    use super::*;
    use af_core::units::m;

    #[test]
    fn tank_length_flows_into_the_flocculator() {
        let etf = EntTankFloc::new(EntTankFlocParams::default()).unwrap();
        let ent_l = etf.ent.l().unwrap();
        assert_eq!(etf.floc.params().ent_l, ent_l);
        // Shorter than the standalone default of 1.5 m, so the serpentine
        // loses less length and a narrower channel suffices.
        assert!(ent_l < m(1.5));
        assert!((etf.floc.chan_w().unwrap().value - 0.32).abs() < 1e-9);
    }

    #[test]
    fn shared_operating_point_overrides_subcomponent_params() {
        let params = EntTankFlocParams {
            q: lps(60.0),
            floc: FlocculatorParams {
                q: lps(5.0),
                ..Default::default()
            },
            ..Default::default()
        };
        let etf = EntTankFloc::new(params).unwrap();
        assert_eq!(etf.ent.params().q, lps(60.0));
        assert_eq!(etf.floc.params().q, lps(60.0));
        assert!((etf.floc.chan_w().unwrap().value - 0.98).abs() < 1e-9);
    }
}
