use chrono::Utc;
use domain::DeviceTypeId;
use uuid::Uuid;

/// Fresh primary key: creation seconds followed by 8 random bytes
pub fn new_device_type_id() -> DeviceTypeId {
    // Seconds wrap in 2106; the random tail keeps keys distinct regardless
    let secs = Utc::now().timestamp() as u32;
    let mut random = [0u8; 8];
    random.copy_from_slice(&Uuid::new_v4().as_bytes()[..8]);
    DeviceTypeId::from_parts(secs, random)
}
