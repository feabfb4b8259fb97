//! af-design: plant component dimensioning for aquaflow.
//!
//! Components own their configuration (`...Params`, built with struct
//! update over `Default`) and expose derived dimensions as lazily
//! evaluated, memoized attributes. Reading an attribute pulls exactly the
//! formulas it depends on through [`af_hydraulics`] and the pipe catalog;
//! results, including failures, are computed once per instance.
//!
//! ```
//! use af_design::{SedimentationChannel, SedimentationChannelParams};
//! use af_core::units::lps;
//!
//! let sed = SedimentationChannel::new(SedimentationChannelParams {
//!     q: lps(60.0),
//!     ..Default::default()
//! });
//! assert_eq!(sed.outlet_pipe_n()?, 7);
//! # Ok::<(), af_design::DesignError>(())
//! ```

pub mod ent;
pub mod ent_floc;
pub mod error;
pub mod floc;
pub mod memo;
pub mod pipe;
pub mod sed_chan;

pub use ent::{EntranceTank, EntranceTankParams, EntranceTankReport};
pub use ent_floc::{EntTankFloc, EntTankFlocParams, EntTankFlocReport};
pub use error::{DesignError, DesignResult};
pub use floc::{Flocculator, FlocculatorParams, FlocculatorReport};
pub use pipe::SelectedPipe;
pub use sed_chan::{SedimentationChannel, SedimentationChannelParams, SedimentationChannelReport};
