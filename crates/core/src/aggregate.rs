//! Normalization of raw endpoint payloads into a [`MetricSample`].
//!
//! Each field follows a fixed rule when its payload is missing or has the
//! wrong shape:
//!
//! | field                    | endpoint    | fallback    |
//! |--------------------------|-------------|-------------|
//! | `cpu_usage`              | `cpu/total` | `0`         |
//! | `mem_usage/used/total`   | `mem`       | `0 / 0 / 1` |
//! | `load1/5/15`             | `load`      | `0`         |
//! | `cpu_temp`               | `sensors`   | absent      |
//! | `gpu_usage/gpu_temp`     | `gpu`       | absent      |

use serde_json::{Map, Value};

use crate::endpoint::RawPayloads;
use crate::sample::MetricSample;

/// Label substring identifying the CPU package temperature sensor.
pub const CPU_PACKAGE_SENSOR_LABEL: &str = "Package id 0";

/// Build a sample from one round's payloads.
pub fn aggregate(raw: &RawPayloads) -> MetricSample {
    let defaults = MetricSample::default();

    let cpu = as_object(raw.cpu.as_ref());
    let mem = as_object(raw.mem.as_ref());
    let load = as_object(raw.load.as_ref());
    let (gpu_usage, gpu_temp) = first_gpu(raw.gpu.as_ref());

    MetricSample {
        cpu_usage: number_or(cpu, "total", defaults.cpu_usage),
        cpu_temp: cpu_package_temp(raw.sensors.as_ref()),
        gpu_usage,
        gpu_temp,
        mem_usage: number_or(mem, "percent", defaults.mem_usage),
        mem_used_bytes: bytes_or(mem, "used", defaults.mem_used_bytes),
        mem_total_bytes: bytes_or(mem, "total", defaults.mem_total_bytes),
        load1: number_or(load, "min1", defaults.load1),
        load5: number_or(load, "min5", defaults.load5),
        load15: number_or(load, "min15", defaults.load15),
    }
}

/// Scan sensors in response order and return the value of the first entry
/// whose label contains [`CPU_PACKAGE_SENSOR_LABEL`].
///
/// The scan stops at the first matching label even if that entry carries
/// no numeric value.
pub fn cpu_package_temp(sensors: Option<&Value>) -> Option<f64> {
    let sensors = sensors?.as_array()?;
    let entry = sensors.iter().find(|sensor| {
        sensor
            .get("label")
            .and_then(Value::as_str)
            .is_some_and(|label| label.contains(CPU_PACKAGE_SENSOR_LABEL))
    })?;
    entry.get("value").and_then(Value::as_f64)
}

/// Usage and temperature of the first GPU in the list; other GPUs are ignored.
pub fn first_gpu(gpus: Option<&Value>) -> (Option<f64>, Option<f64>) {
    let Some(gpu) = gpus.and_then(Value::as_array).and_then(|list| list.first()) else {
        return (None, None);
    };
    (
        gpu.get("proc").and_then(Value::as_f64),
        gpu.get("temperature").and_then(Value::as_f64),
    )
}

fn as_object(payload: Option<&Value>) -> Option<&Map<String, Value>> {
    payload.and_then(Value::as_object)
}

fn number_or(object: Option<&Map<String, Value>>, key: &str, fallback: f64) -> f64 {
    object
        .and_then(|o| o.get(key))
        .and_then(Value::as_f64)
        .unwrap_or(fallback)
}

fn bytes_or(object: Option<&Map<String, Value>>, key: &str, fallback: u64) -> u64 {
    let Some(value) = object.and_then(|o| o.get(key)) else {
        return fallback;
    };
    value
        .as_u64()
        .or_else(|| value.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
        .unwrap_or(fallback)
}
