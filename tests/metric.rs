use mlflow_registry_wire::{current_time_millis, DictionaryEntity, Metric, WireEntity};
use nanorand::{WyRand, RNG};

fn random_str(rng: &mut WyRand) -> String {
    (0..12)
        .map(|_| (b'a' + rng.generate::<u8>() % 26) as char)
        .collect()
}

fn check(metric: &Metric, key: &str, value: f64, timestamp: i64, step: i64) {
    assert_eq!(metric.key, key);
    assert_eq!(metric.value, value);
    assert_eq!(metric.timestamp, timestamp);
    assert_eq!(metric.step, step);
}

#[test]
fn creation_and_hydration() -> anyhow::Result<()> {
    let mut rng = WyRand::new_seed(current_time_millis() as u64);
    let key = random_str(&mut rng);
    let value = 10000.0;
    let ts = current_time_millis();
    let step = i64::from(rng.generate::<u32>());

    let metric = Metric::new(key.as_str(), value, ts, step);
    check(&metric, &key, value, ts, step);

    let as_dict = metric.to_dictionary();
    assert_eq!(
        serde_json::Value::Object(as_dict.clone()),
        serde_json::json!({"key": key, "value": value, "timestamp": ts, "step": step})
    );

    let proto = metric.to_wire();
    let metric2 = Metric::from_wire(proto)?;
    check(&metric2, &key, value, ts, step);

    let metric3 = Metric::from_dictionary(&as_dict)?;
    check(&metric3, &key, value, ts, step);
    Ok(())
}

#[test]
fn accuracy_scenario() -> anyhow::Result<()> {
    let metric = Metric::new("accuracy", 0.95, 1_700_000_000_000, 3);
    assert_eq!(
        metric.to_json_string(),
        r#"{"key":"accuracy","value":0.95,"timestamp":1700000000000,"step":3}"#
    );
    assert_eq!(Metric::decode(&metric.encode_to_vec())?, metric);
    assert_eq!(Metric::from_json(&metric.to_json()?)?, metric);
    Ok(())
}

#[test]
fn random_metrics_round_trip() -> anyhow::Result<()> {
    let mut rng = WyRand::new_seed(7);
    for _ in 0..32 {
        let int: f64 = rng.generate::<u16>().into();
        let max: f64 = u16::MAX.into();
        let metric = Metric::new(
            random_str(&mut rng),
            int / max,
            current_time_millis(),
            i64::from(rng.generate::<u16>()),
        );
        assert_eq!(Metric::from_wire(metric.to_wire())?, metric);
        assert_eq!(Metric::from_dictionary(&metric.to_dictionary())?, metric);
    }
    Ok(())
}
