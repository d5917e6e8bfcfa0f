pub mod channel_service;
pub mod geo_service;
pub mod report_service;
pub mod video_service;
pub mod youtube;
