//! Schema-driven translation of a report document.
//!
//! Only the textual fields listed in [`ReportWalker::translate_report`] are
//! touched. Every other value, including unknown keys and non-string values
//! sitting at textual positions, is copied unchanged, so the output has
//! exactly the keys and array lengths of the input.

use log::{debug, info};
use serde_json::{Map, Value};

use crate::config::RequestProfiles;
use crate::error::Result;
use crate::llm::TextGenerator;
use crate::translator::Translator;

pub const SHIFT_FIELDS: [&str; 5] = ["title", "from", "to", "through", "trend"];

pub struct ReportWalker<'a, G: TextGenerator + ?Sized> {
    translator: Translator<'a, G>,
}

impl<'a, G: TextGenerator + ?Sized> ReportWalker<'a, G> {
    pub fn new(generator: &'a G, profiles: RequestProfiles) -> Self {
        Self {
            translator: Translator::new(generator, profiles),
        }
    }

    /// Returns a translated copy of `report`.
    ///
    /// Order: key focus, SRT levels (name, then event titles and descriptions
    /// as batches), flat events, flat trends, structural shifts, radar
    /// signals, cross-level links, momentum trends, category keys.
    pub async fn translate_report(&self, report: &Value) -> Result<Value> {
        let mut report = report.clone();
        let Some(root) = report.as_object_mut() else {
            return Ok(report);
        };

        info!(
            "Translating report dated {}",
            root.get("date").and_then(Value::as_str).unwrap_or("unknown")
        );

        if self.translate_field(root, "key_focus").await? {
            info!("  key_focus");
        }

        if let Some(levels) = array_mut(root, "srt_levels") {
            for level in levels.iter_mut() {
                let Some(level) = level.as_object_mut() else {
                    continue;
                };
                self.translate_field(level, "name").await?;
                if let Some(events) = array_mut(level, "events") {
                    self.translate_column(events, "title").await;
                    self.translate_column(events, "description").await;
                }
                info!(
                    "  SRT level {}: {}",
                    level.get("level").map(display).unwrap_or_else(|| "?".into()),
                    level.get("name").map(display).unwrap_or_default()
                );
            }
        }

        if let Some(events) = non_empty_array_mut(root, "events") {
            self.translate_column(events, "title").await;
            self.translate_column(events, "description").await;
            info!("  {} flat events", events.len());
        }

        if let Some(trends) = non_empty_array_mut(root, "trends") {
            self.translate_column(trends, "name").await;
            self.translate_column(trends, "rationale").await;
            info!("  {} flat trends", trends.len());
        }

        if let Some(shifts) = non_empty_array_mut(root, "structural_shifts") {
            for shift in shifts.iter_mut() {
                if let Some(shift) = shift.as_object_mut() {
                    self.translate_record(shift, &SHIFT_FIELDS).await;
                }
            }
            info!("  {} structural shifts", shifts.len());
        }

        for (key, fields, label) in [
            ("radar_signals", ["title", "description"], "radar signals"),
            ("cross_level_links", ["title", "description"], "cross-level links"),
            ("momentum_trends", ["name", "rationale"], "momentum trends"),
        ] {
            if let Some(items) = non_empty_array_mut(root, key) {
                for item in items.iter_mut() {
                    let Some(item) = item.as_object_mut() else {
                        continue;
                    };
                    for field in fields {
                        self.translate_field(item, field).await?;
                    }
                }
                info!("  {} {}", items.len(), label);
            }
        }

        if let Some(Value::Object(categories)) = root.get_mut("categories") {
            if !categories.is_empty() {
                let source = std::mem::take(categories);
                *categories = self.translate_keys(source).await?;
                info!("  categories");
            }
        }

        Ok(report)
    }

    /// Translates `obj[key]` in place when it is a non-empty string.
    /// Returns whether a string was present.
    async fn translate_field(&self, obj: &mut Map<String, Value>, key: &str) -> Result<bool> {
        let text = match obj.get(key) {
            Some(Value::String(text)) if !text.is_empty() => text.clone(),
            _ => return Ok(false),
        };
        let translated = self.translator.translate_text(&text).await?;
        obj.insert(key.to_string(), Value::String(translated));
        Ok(true)
    }

    /// Batch-translates one field across a list of objects.
    async fn translate_column(&self, items: &mut [Value], key: &str) {
        let texts: Vec<String> = items
            .iter()
            .map(|item| string_at(item, key).to_string())
            .collect();
        let translated = self.translator.translate_batch(&texts).await;

        for (item, text) in items.iter_mut().zip(translated) {
            set_if_string(item, key, text);
        }
    }

    /// Batch-translates several fields of a single object.
    async fn translate_record(&self, obj: &mut Map<String, Value>, fields: &[&str]) {
        let texts: Vec<String> = fields
            .iter()
            .map(|f| obj.get(*f).and_then(Value::as_str).unwrap_or_default().to_string())
            .collect();
        let translated = self.translator.translate_batch(&texts).await;

        for (field, text) in fields.iter().zip(translated) {
            if let Some(Value::String(slot)) = obj.get_mut(*field) {
                *slot = text;
            }
        }
    }

    /// Translates map keys, leaving values untouched. When two keys translate
    /// to the same string the later entry wins.
    async fn translate_keys(&self, source: Map<String, Value>) -> Result<Map<String, Value>> {
        let mut translated = Map::new();
        for (name, data) in source {
            let new_name = self.translator.translate_text(&name).await?;
            if translated.contains_key(&new_name) {
                debug!("Category '{}' collides with '{}', overwriting", name, new_name);
            }
            translated.insert(new_name, data);
        }
        Ok(translated)
    }
}

fn array_mut<'v>(obj: &'v mut Map<String, Value>, key: &str) -> Option<&'v mut Vec<Value>> {
    obj.get_mut(key).and_then(Value::as_array_mut)
}

fn non_empty_array_mut<'v>(obj: &'v mut Map<String, Value>, key: &str) -> Option<&'v mut Vec<Value>> {
    array_mut(obj, key).filter(|items| !items.is_empty())
}

fn string_at<'v>(item: &'v Value, key: &str) -> &'v str {
    item.get(key).and_then(Value::as_str).unwrap_or_default()
}

fn set_if_string(item: &mut Value, key: &str, text: String) {
    if let Some(Value::String(slot)) = item.get_mut(key) {
        *slot = text;
    }
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockGenerator;
    use serde_json::json;

    fn walker(mock: &MockGenerator) -> ReportWalker<'_, MockGenerator> {
        ReportWalker::new(mock, RequestProfiles::default())
    }

    #[tokio::test]
    async fn test_non_object_report_is_returned_as_is() {
        let mock = MockGenerator::new();
        let out = walker(&mock).translate_report(&json!([1, 2])).await.unwrap();
        assert_eq!(out, json!([1, 2]));
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_report_makes_no_requests() {
        let mock = MockGenerator::new();
        let report = json!({"date": "2024-01-01", "srt_levels": [], "categories": {}});
        let out = walker(&mock).translate_report(&report).await.unwrap();
        assert_eq!(out, report);
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_event_fields_are_not_added() {
        let mock = MockGenerator::new().respond_to("[0] Запуск", "[0] Launch");
        let report = json!({
            "srt_levels": [{"level": 2, "events": [{"title": "Запуск"}, {"score": 3}]}]
        });

        let out = walker(&mock).translate_report(&report).await.unwrap();

        assert_eq!(
            out,
            json!({"srt_levels": [{"level": 2, "events": [{"title": "Launch"}, {"score": 3}]}]})
        );
    }

    #[tokio::test]
    async fn test_shift_fields_batched_per_shift() {
        let mock = MockGenerator::new().respond_to(
            "[0] Сдвиг\n[1] Старое\n[2] Новое\n[4] ускоряется",
            "[0] Shift\n[1] Old\n[2] New\n[4] accelerating",
        );
        let report = json!({
            "structural_shifts": [
                {"title": "Сдвиг", "from": "Старое", "to": "Новое", "through": "", "trend": "ускоряется", "levels": [9, 5]}
            ]
        });

        let out = walker(&mock).translate_report(&report).await.unwrap();

        assert_eq!(
            out["structural_shifts"][0],
            json!({"title": "Shift", "from": "Old", "to": "New", "through": "", "trend": "accelerating", "levels": [9, 5]})
        );
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_category_collision_later_wins() {
        let mock = MockGenerator::new()
            .respond_to("Модели", "Models")
            .respond_to("Модели ИИ", "Models");
        let report = json!({
            "categories": {"Модели": {"count": 1}, "Hardware": {"count": 2}, "Модели ИИ": {"count": 3}}
        });

        let out = walker(&mock).translate_report(&report).await.unwrap();
        let categories = out["categories"].as_object().unwrap();

        assert_eq!(categories.len(), 2);
        assert_eq!(categories["Models"], json!({"count": 3}));
        assert_eq!(categories["Hardware"], json!({"count": 2}));
    }

    #[tokio::test]
    async fn test_single_text_failure_is_fatal() {
        let mock = MockGenerator::new();
        let report = json!({"key_focus": "Рост ИИ"});
        assert!(walker(&mock).translate_report(&report).await.is_err());
    }

    #[tokio::test]
    async fn test_non_string_leaf_is_left_alone() {
        let mock = MockGenerator::new();
        let report = json!({"key_focus": 42, "radar_signals": [{"title": null, "description": 1.5}]});
        let out = walker(&mock).translate_report(&report).await.unwrap();
        assert_eq!(out, report);
    }
}
