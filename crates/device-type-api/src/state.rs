use application::DeviceTypeService;
use axum::http::HeaderName;

pub struct AppState {
    pub service: DeviceTypeService,
    /// Trusted header carrying the caller role
    pub role_header: HeaderName,
}

impl AppState {
    pub fn new(service: DeviceTypeService, role_header: HeaderName) -> Self {
        Self {
            service,
            role_header,
        }
    }
}
