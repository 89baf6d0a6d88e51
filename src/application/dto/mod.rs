mod scan_request;

pub use scan_request::ScanRequest;
