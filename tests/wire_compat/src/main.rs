fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

#[cfg(test)]
mod tests {
    use astroshare_protocol::messages::{
        ApiErrorBody, CompleteChunkUploadRequest, CompleteChunkUploadResponse, FinalizeResponse,
        InitChunkUploadRequest, InitChunkUploadResponse,
    };
    use astroshare_protocol::types::{
        CelestialObjectLink, FileKind, GearItem, ImageDetails, LocationInfo, SessionInfo,
    };
    use serde_json::{Value, json};

    /// Deserializes a captured server payload into a Rust type,
    /// re-serializes it, and compares the JSON values. Any field name or
    /// casing drift from the server contract fails here.
    fn roundtrip<T>(fixture: Value)
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let parsed: T = serde_json::from_value(fixture.clone())
            .unwrap_or_else(|e| panic!("failed to deserialize fixture: {e}\n  {fixture}"));
        let reserialized = serde_json::to_value(&parsed)
            .unwrap_or_else(|e| panic!("failed to re-serialize fixture: {e}"));
        assert_eq!(
            fixture, reserialized,
            "roundtrip mismatch:\n  server: {fixture}\n  client: {reserialized}"
        );
    }

    // --- Chunk protocol payloads ---

    #[test]
    fn init_request_wire_shape() {
        roundtrip::<InitChunkUploadRequest>(json!({
            "fileName": "andromeda.tif",
            "fileSize": 104857600u64,
            "fileType": "image/tiff",
            "totalChunks": 100,
            "uploadType": "mainImage",
            "fileId": "mainImage-1724800000000",
        }));
    }

    #[test]
    fn init_request_multi_kind_file_id() {
        roundtrip::<InitChunkUploadRequest>(json!({
            "fileName": "light_001.fits",
            "fileSize": 6291457u64,
            "fileType": "application/octet-stream",
            "totalChunks": 7,
            "uploadType": "lightFrame",
            "fileId": "lightFrame-0-1724800000000",
        }));
    }

    #[test]
    fn init_response_wire_shape() {
        roundtrip::<InitChunkUploadResponse>(json!({
            "uploadId": "c1f9a2b4",
        }));
    }

    #[test]
    fn complete_request_wire_shape() {
        roundtrip::<CompleteChunkUploadRequest>(json!({
            "uploadId": "c1f9a2b4",
            "fileName": "andromeda.tif",
            "fileType": "image/tiff",
        }));
    }

    #[test]
    fn complete_response_wire_shape() {
        roundtrip::<CompleteChunkUploadResponse>(json!({
            "filePath": "/uploads/chunked/andromeda.tif",
        }));
    }

    #[test]
    fn finalize_response_wire_shape() {
        roundtrip::<FinalizeResponse>(json!({
            "message": "Image uploaded successfully",
            "image_id": "42",
        }));
    }

    #[test]
    fn finalize_response_without_image_id() {
        // image_id is omitted, not null, when absent.
        let parsed: FinalizeResponse =
            serde_json::from_value(json!({ "message": "ok" })).unwrap();
        assert!(parsed.image_id.is_none());
        let out = serde_json::to_value(&parsed).unwrap();
        assert_eq!(out, json!({ "message": "ok" }));
    }

    #[test]
    fn error_body_both_server_spellings() {
        roundtrip::<ApiErrorBody>(json!({ "error": "Missing main image" }));
        roundtrip::<ApiErrorBody>(json!({ "message": "Invalid token" }));
    }

    // --- Upload type discriminators ---

    #[test]
    fn upload_type_wire_names() {
        let expected = [
            (FileKind::MainImage, "mainImage"),
            (FileKind::AdditionalImage, "additionalImage"),
            (FileKind::Documentation, "documentation"),
            (FileKind::LightFrame, "lightFrame"),
            (FileKind::DarkFrame, "darkFrame"),
            (FileKind::FlatFrame, "flatFrame"),
            (FileKind::BiasFrame, "biasFrame"),
            (FileKind::DarkFlat, "darkFlat"),
        ];
        for (kind, wire) in expected {
            assert_eq!(serde_json::to_value(kind).unwrap(), json!(wire));
        }
    }

    // --- Metadata groups ---

    #[test]
    fn image_details_wire_shape() {
        roundtrip::<ImageDetails>(json!({
            "title": "M31 Andromeda Galaxy",
            "description": "Two-panel mosaic",
            "captureDateTime": "2026-08-20T22:30:00",
            "exposureTime": 300.0,
            "iso": 800,
            "aperture": 5.6,
            "focalLength": 530.0,
            "focusScore": 8.7,
        }));
    }

    #[test]
    fn location_wire_shape() {
        roundtrip::<LocationInfo>(json!({
            "name": "Atacama Desert",
            "latitude": -24.627,
            "longitude": -70.404,
            "bortleClass": 1,
            "notes": "exceptional seeing",
        }));
    }

    #[test]
    fn gear_item_wire_shape() {
        roundtrip::<GearItem>(json!({
            "gearType": "telescope",
            "brand": "Celestron",
            "model": "EdgeHD 8",
        }));
    }

    #[test]
    fn session_wire_shape() {
        roundtrip::<SessionInfo>(json!({
            "sessionDate": "2026-08-20",
            "weatherConditions": "clear",
            "seeingConditions": "excellent",
            "moonPhase": "new moon",
            "lightPollutionIndex": 2,
        }));
    }

    #[test]
    fn celestial_object_wire_shape() {
        roundtrip::<CelestialObjectLink>(json!({
            "name": "M31",
            "objectType": "galaxy",
            "rightAscension": 10.6847,
            "declination": 41.2687,
            "magnitude": 3.44,
            "description": "Andromeda Galaxy",
        }));
    }

    // --- Finalize form keys ---

    #[test]
    fn direct_file_form_keys() {
        let expected = [
            (FileKind::MainImage, "mainImage"),
            (FileKind::AdditionalImage, "additionalImages"),
            (FileKind::Documentation, "documentation"),
            (FileKind::LightFrame, "lightFrames"),
            (FileKind::DarkFrame, "darkFrames"),
            (FileKind::FlatFrame, "flatFrames"),
            (FileKind::BiasFrame, "biasFrames"),
            (FileKind::DarkFlat, "darkFlats"),
        ];
        for (kind, key) in expected {
            assert_eq!(kind.form_key(), key);
        }
    }

    #[test]
    fn chunked_file_reference_key_shape() {
        use astroshare_submit::FinalizePart;
        use astroshare_submit::assemble::assemble_finalize;
        use astroshare_submit::types::ObservationMetadata;
        use std::collections::HashMap;

        let mut completed = HashMap::new();
        completed.insert(
            "darkFrame-2-1724800000000".to_string(),
            "/uploads/chunked/dark_003.fits".to_string(),
        );
        let parts =
            assemble_finalize(&[], &completed, &ObservationMetadata::default()).unwrap();

        let found = parts.iter().any(|p| match p {
            FinalizePart::Text { name, value } => {
                name == "chunkedFiles[darkFrame-2-1724800000000]"
                    && value == "/uploads/chunked/dark_003.fits"
            }
            _ => false,
        });
        assert!(found, "chunked reference key missing: {parts:?}");
    }
}
