//! End-to-end pipeline tests: load -> train -> save -> load -> predict

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use agroyield::dataset::load_training_data;
use agroyield::error::AgroError;
use agroyield::inference::InferenceEngine;
use agroyield::schema::FeatureRecord;
use agroyield::training::train_and_select;

const HEADER: &str =
    "crop_type,season,state,rainfall,avg_temperature,pesticide_usage,fertilizer,area,crop_yield";

fn synthetic_csv(n_rows: usize) -> String {
    let crops = ["rice", "wheat", "maize"];
    let seasons = ["kharif", "rabi"];
    let states = ["punjab", "haryana", "bihar"];

    let mut csv = String::from(HEADER);
    csv.push('\n');
    for i in 0..n_rows {
        let rainfall = 300.0 + (i % 17) as f64 * 40.0;
        let temperature = 15.0 + (i % 13) as f64;
        let pesticide = (i % 5) as f64 * 0.5;
        let fertilizer = 20.0 + (i % 7) as f64 * 10.0;
        let area = 1.0 + (i % 4) as f64;
        let yield_value = 2.5 * rainfall + 12.0 * fertilizer + 30.0 * temperature + 400.0;
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{},{}\n",
            crops[i % crops.len()],
            seasons[i % seasons.len()],
            states[i % states.len()],
            rainfall,
            temperature,
            pesticide,
            fertilizer,
            area,
            yield_value
        ));
    }
    csv
}

fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut f = File::create(&path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    path
}

fn rice_record() -> FeatureRecord {
    FeatureRecord {
        crop_type: "rice".to_string(),
        season: "kharif".to_string(),
        state: "punjab".to_string(),
        rainfall: 700.0,
        avg_temperature: 27.0,
        pesticide_usage: 1.5,
        fertilizer: 50.0,
        area: 2.0,
    }
}

#[test]
fn test_train_save_load_predict() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = write_file(&dir, "crops.csv", &synthetic_csv(60));
    let model_path = dir.path().join("models/model.bin");

    let (records, targets) = load_training_data(&data_path).unwrap();
    assert_eq!(records.len(), 60);

    let result = train_and_select(&records, &targets).unwrap();
    assert_eq!(result.candidates.len(), 2);
    result.artifact.save(&model_path).unwrap();

    let engine = InferenceEngine::load(&model_path).unwrap();
    let prediction = engine.predict(&rice_record()).unwrap();
    assert!(prediction.is_finite());
    // Rounded to 2 decimal places
    assert_eq!(prediction, (prediction * 100.0).round() / 100.0);
}

#[test]
fn test_rice_scenario_recommendations() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = write_file(&dir, "crops.csv", &synthetic_csv(60));

    let (records, targets) = load_training_data(&data_path).unwrap();
    let result = train_and_select(&records, &targets).unwrap();
    let engine = InferenceEngine::from_artifact(result.artifact);

    let outcome = engine.predict_with_recommendations(&rice_record()).unwrap();
    assert!(outcome.recommendations.len() >= 2);
    assert!(outcome.recommendations[0].contains("Urea"));
    assert!(outcome.recommendations[1].contains("Monocrotophos"));
}

#[test]
fn test_unknown_crop_gets_fallback_guidance() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = write_file(&dir, "crops.csv", &synthetic_csv(60));

    let (records, targets) = load_training_data(&data_path).unwrap();
    let result = train_and_select(&records, &targets).unwrap();
    let engine = InferenceEngine::from_artifact(result.artifact);

    let mut record = rice_record();
    record.crop_type = "unknownplant".to_string();
    record.state = "neverseen".to_string();

    // Unknown categories are not an error; they encode to all-zero blocks
    let outcome = engine.predict_with_recommendations(&record).unwrap();
    assert!(outcome.recommendations[0].contains("unknownplant"));
}

#[test]
fn test_predictions_survive_round_trip_identically() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = write_file(&dir, "crops.csv", &synthetic_csv(60));
    let model_path = dir.path().join("model.bin");

    let (records, targets) = load_training_data(&data_path).unwrap();
    let result = train_and_select(&records, &targets).unwrap();
    let before = InferenceEngine::from_artifact(result.artifact.clone());
    result.artifact.save(&model_path).unwrap();
    let after = InferenceEngine::load(&model_path).unwrap();

    for record in records.iter().take(10) {
        assert_eq!(
            before.predict(record).unwrap(),
            after.predict(record).unwrap()
        );
    }
}

#[test]
fn test_empty_dataset_fails_and_leaves_artifact_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let model_path = dir.path().join("model.bin");

    // Train once so an artifact exists
    let data_path = write_file(&dir, "crops.csv", &synthetic_csv(60));
    let (records, targets) = load_training_data(&data_path).unwrap();
    let result = train_and_select(&records, &targets).unwrap();
    result.artifact.save(&model_path).unwrap();
    let saved_bytes = std::fs::read(&model_path).unwrap();

    // A header-only CSV must fail before anything is written
    let empty_path = write_file(&dir, "empty.csv", &format!("{}\n", HEADER));
    assert!(matches!(
        load_training_data(&empty_path),
        Err(AgroError::Dataset(_))
    ));

    assert_eq!(std::fs::read(&model_path).unwrap(), saved_bytes);
}

#[test]
fn test_training_is_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = write_file(&dir, "crops.csv", &synthetic_csv(60));

    let (records, targets) = load_training_data(&data_path).unwrap();
    let a = train_and_select(&records, &targets).unwrap();
    let b = train_and_select(&records, &targets).unwrap();

    assert_eq!(a.winner(), b.winner());
    assert_eq!(a.artifact.cv_score, b.artifact.cv_score);

    let engine_a = InferenceEngine::from_artifact(a.artifact);
    let engine_b = InferenceEngine::from_artifact(b.artifact);
    assert_eq!(
        engine_a.predict(&rice_record()).unwrap(),
        engine_b.predict(&rice_record()).unwrap()
    );
}

#[test]
fn test_yield_band_messages_use_strict_thresholds() {
    // Pure-function check against a fitted engine's wiring: the band
    // message depends only on the rounded prediction.
    let record = rice_record();
    let low = agroyield::recommend::recommend(&record, 2999.99);
    let mid = agroyield::recommend::recommend(&record, 3000.0);
    let high = agroyield::recommend::recommend(&record, 6000.01);
    let edge_high = agroyield::recommend::recommend(&record, 6000.0);

    assert!(low.last().unwrap().contains("Yield is low"));
    assert_eq!(mid.len(), 2);
    assert!(high.last().unwrap().contains("Great yield"));
    assert_eq!(edge_high.len(), 2);
}

#[test]
fn test_wire_alias_for_temperature() {
    let json = r#"{
        "crop_type": "rice",
        "season": "kharif",
        "state": "punjab",
        "rainfall": 700.0,
        "avg_temp": 27.0,
        "pesticide_usage": 1.5,
        "fertilizer": 50.0,
        "area": 2.0
    }"#;
    let record: FeatureRecord = serde_json::from_str(json).unwrap();
    assert_eq!(record.avg_temperature, 27.0);
}

#[test]
fn test_selector_handles_small_but_valid_dataset() {
    // Just above the 5-fold minimum
    let dir = tempfile::tempdir().unwrap();
    let data_path = write_file(&dir, "crops.csv", &synthetic_csv(12));

    let (records, targets) = load_training_data(&data_path).unwrap();
    let result = train_and_select(&records, &targets).unwrap();

    let x = result.artifact.pipeline.transform(&records).unwrap();
    let predictions = result.artifact.regressor.predict(&x).unwrap();
    assert_eq!(predictions.len(), 12);
}
