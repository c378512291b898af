#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const TILE_ID: &str = "e9f0a1b2-c3d4-4567-8901-234567bcdef7";
pub const QUERY_ID: &str = "d9e0f1a2-b3c4-4678-9012-345678bcdef8";

pub const DASHBOARD: &str = r#"{
  "$schema": "https://dataexplorer.azure.com/static/d/schema/52/dashboard.json",
  "id": "6a1b2c3d-0000-4000-8000-000000000001",
  "eTag": "1",
  "schema_version": "52",
  "title": "BC Telemetry",
  "tiles": [
    {
      "id": "11111111-2222-4333-8444-555555555555",
      "title": "Sessions",
      "visualType": "timechart",
      "pageId": "f4a5b6c7-d8e9-4012-3456-789012abcdef",
      "layout": {
        "x": 0,
        "y": 0,
        "width": 12,
        "height": 6
      }
    }
  ],
  "queries": [],
  "pages": [
    {
      "name": "Hagar Extensions",
      "id": "f4a5b6c7-d8e9-4012-3456-789012abcdef"
    }
  ]
}"#;

pub fn plan_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("plans").join(name)
}

/// Writes the fixture dashboard into `dir` and returns its path.
pub fn write_dashboard(dir: &Path) -> PathBuf {
    let path = dir.join("BCTelemetryDashboard.json");
    fs::write(&path, DASHBOARD).expect("failed to write fixture dashboard");
    path
}
