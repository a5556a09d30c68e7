pub mod config;
pub mod estimators;
pub mod geometry;
pub mod sensors;
pub mod spatial_database;
pub mod systems;
pub mod variography;

pub mod prelude {

    pub mod re_exports {
        pub use nalgebra;
    }

    pub use crate::config::MonitorConfig;
    pub use crate::estimators::ordinary_kriging::{
        estimate as ok_estimate, estimate_batch as ok_estimate_batch, try_krige, KrigedValue,
        KrigingEngine,
    };
    pub use crate::geometry::{geodesic::haversine_distance, GeoPoint};
    pub use crate::sensors::{
        feed::{SensorFeed, SensorReading},
        monitor::{Monitor, QueryOutcome},
        severity::Severity,
        simulator::MockSensorFeed,
    };
    pub use crate::spatial_database::{QueryPoint, SamplePoint};
    pub use crate::variography::model_variograms::{
        iso_fitter::fit_parameters, VariogramParameters,
    };
}
