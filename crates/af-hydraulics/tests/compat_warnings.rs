//! Compatibility warnings are observable tracing events, and failures in
//! the resolution layer never emit one.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use af_core::units::{k, m, m2, m2ps, m3ps, mps};
use af_hydraulics::{
    density_water, density_water_compat, DensityWaterArgs, HydraulicsError,
};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::Registry;

#[derive(Clone, Default)]
struct WarnCounter(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

fn warns_during(f: impl FnOnce()) -> usize {
    let counter = WarnCounter::default();
    let count = counter.0.clone();
    let subscriber = Registry::default().with(counter);
    tracing::subscriber::with_default(subscriber, f);
    count.load(Ordering::SeqCst)
}

#[test]
fn legacy_keyword_warns_once_and_still_computes() {
    let warns = warns_during(|| {
        let via_legacy = density_water_compat(DensityWaterArgs {
            temp: Some(k(300.0)),
            ..Default::default()
        })
        .unwrap();
        let strict = density_water(k(300.0)).unwrap();
        assert_eq!(via_legacy.value, strict.value);
    });
    assert_eq!(warns, 1, "exactly one compatibility warning expected");
}

#[test]
fn current_keyword_is_silent() {
    let warns = warns_during(|| {
        density_water_compat(DensityWaterArgs {
            temperature: Some(k(300.0)),
            ..Default::default()
        })
        .unwrap();
    });
    assert_eq!(warns, 0);
}

#[test]
fn argument_conflict_fails_without_warning() {
    let warns = warns_during(|| {
        let err = density_water_compat(DensityWaterArgs {
            temperature: Some(k(300.0)),
            temp: Some(k(300.0)),
        })
        .unwrap_err();
        assert!(matches!(err, HydraulicsError::ArgConflict { .. }));
    });
    assert_eq!(warns, 0, "a conflict is an error, not a warning");
}

#[test]
#[allow(deprecated)]
fn deprecated_formula_names_warn_and_forward() {
    let warns = warns_during(|| {
        let old = af_hydraulics::reynolds::re_general(mps(1.0), m2(1.0), m(1.0), m2ps(1e-6))
            .unwrap();
        let new = af_hydraulics::re_channel(mps(1.0), m2(1.0), m(1.0), m2ps(1e-6)).unwrap();
        assert_eq!(old, new);
        let old = af_hydraulics::weir::headloss_weir(m3ps(0.005), m(1.0)).unwrap();
        let new = af_hydraulics::headloss_weir_rect(m3ps(0.005), m(1.0)).unwrap();
        assert_eq!(old.value, new.value);
    });
    assert_eq!(warns, 2);
}

#[test]
#[allow(deprecated)]
fn retired_formula_warns_then_fails() {
    let warns = warns_during(|| {
        let err = af_hydraulics::porous::headloss_kozeny(mps(0.1), m(0.001), k(298.0), 0.4, m(1.0))
            .unwrap_err();
        assert!(matches!(err, HydraulicsError::Retired { .. }));
    });
    assert_eq!(warns, 1);
}
