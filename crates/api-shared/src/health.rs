use crate::wire::HealthRes;

/// Simple health service shared by the REST API and the server binary.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Check health without creating an instance.
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Namaste mapper is alive".into(),
        }
    }
}
