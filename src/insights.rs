use chrono::Utc;
use log::{info, warn};
use serde_json::Value;

use crate::config::RequestProfiles;
use crate::error::{EnricherError, Result};
use crate::llm::prompts::{
    INSIGHT_TRANSLATION_INSTRUCTIONS, PROMPT_DEFAULT_DATE, SYSTEM_PROMPT_INSIGHTS,
    SYSTEM_PROMPT_TRANSLATE_JSON,
};
use crate::llm::{GenerationRequest, TextGenerator};
use crate::schema::{
    AccentColor, Insight, InsightCollection, InsightIcon, ProgramKey, DEFAULT_PERIOD, INSIGHT_COUNT,
};
use crate::utils::{excerpt, strip_code_fences, utc_timestamp};

/// Plain-text sections of a report fed to the insight prompt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportDigest {
    pub events: String,
    pub shifts: String,
    pub signals: String,
}

impl ReportDigest {
    pub fn from_report(report: &Value) -> Self {
        let mut digest = Self::default();

        for level in items(report, "srt_levels") {
            digest.events.push_str(&format!(
                "\n### СРТ Уровень {}: {}\n",
                field(level, "level"),
                field(level, "name")
            ));
            for event in items(level, "events") {
                digest.events.push_str(&format!(
                    "- {}: {}\n",
                    field(event, "title"),
                    field(event, "description")
                ));
            }
        }

        for shift in items(report, "structural_shifts") {
            digest.shifts.push_str(&format!(
                "- {}: от «{}» к «{}» через «{}»\n",
                field(shift, "title"),
                field(shift, "from"),
                field(shift, "to"),
                field(shift, "through")
            ));
        }

        for signal in items(report, "radar_signals") {
            digest.signals.push_str(&format!(
                "- {}: {}\n",
                field(signal, "title"),
                field(signal, "description")
            ));
        }

        digest
    }
}

/// Builds the user prompt asking for [`INSIGHT_COUNT`] insights.
pub fn build_insight_prompt(report: &Value) -> String {
    let date = report
        .get("date")
        .and_then(Value::as_str)
        .unwrap_or(PROMPT_DEFAULT_DATE);
    let digest = ReportDigest::from_report(report);

    let icons = InsightIcon::ALL.map(|i| i.as_str()).join(", ");
    let colors = AccentColor::ALL.map(|c| c.hex()).join(", ");
    let programs = ProgramKey::ALL.map(|p| p.key()).join(", ");

    format!(
        "Проанализируй данные AI-отчёта за {date} и сгенерируй {n} стратегических инсайтов.\n\
         \n\
         ДАННЫЕ ОТЧЁТА:\n\
         {events}\n\
         \n\
         СТРУКТУРНЫЕ СДВИГИ:\n\
         {shifts}\n\
         \n\
         СЛАБЫЕ СИГНАЛЫ:\n\
         {signals}\n\
         \n\
         Для каждого инсайта верни JSON объект со следующими полями:\n\
         - id: порядковый номер (1-{n})\n\
         - title: краткий яркий заголовок в кавычках (например: «Великое перемещение стоимости»)\n\
         - subtitle: подзаголовок в 3-5 слов\n\
         - icon: одна из иконок: {icons}\n\
         - accentColor: один из цветов: {colors}\n\
         - summary: развёрнутое описание инсайта (2-3 предложения)\n\
         - evidence: массив из 3-5 конкретных фактов/цифр из отчёта\n\
         - nonObviousConclusion: неочевидный вывод (2-3 предложения)\n\
         - educationImplication: образовательные импликации для СКОЛКОВО (1-2 предложения)\n\
         - relevantPrograms: массив ключей программ из списка: {programs}\n\
         \n\
         Верни ТОЛЬКО валидный JSON массив из {n} объектов, без markdown-обёрток.",
        n = INSIGHT_COUNT,
        events = digest.events,
        shifts = digest.shifts,
        signals = digest.signals,
    )
}

/// Parses a model response as a JSON array, tolerating a code fence around it.
/// Entries are returned as generated; nothing is validated or filled in.
pub fn parse_insight_array(raw: &str) -> Result<Vec<Value>> {
    let body = strip_code_fences(raw);
    serde_json::from_str::<Vec<Value>>(body).map_err(|e| EnricherError::ResponseParse {
        reason: e.to_string(),
        excerpt: excerpt(body, 200),
    })
}

/// Describes how `insights` deviate from the dashboard's insight shape.
pub fn shape_warnings(insights: &[Value]) -> Vec<String> {
    let mut warnings = Vec::new();
    if insights.len() != INSIGHT_COUNT {
        warnings.push(format!(
            "expected {} insights, got {}",
            INSIGHT_COUNT,
            insights.len()
        ));
    }
    for (i, value) in insights.iter().enumerate() {
        if let Err(e) = serde_json::from_value::<Insight>(value.clone()) {
            warnings.push(format!("insight #{}: {}", i + 1, e));
        }
    }
    warnings
}

pub fn period_of(report: &Value) -> String {
    report
        .get("date")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_PERIOD)
        .to_string()
}

pub struct InsightSynthesizer<'a, G: TextGenerator + ?Sized> {
    generator: &'a G,
    profiles: RequestProfiles,
}

impl<'a, G: TextGenerator + ?Sized> InsightSynthesizer<'a, G> {
    pub fn new(generator: &'a G, profiles: RequestProfiles) -> Self {
        Self {
            generator,
            profiles,
        }
    }

    /// Generates the source-language collection for `report`.
    pub async fn synthesize(&self, report: &Value) -> Result<InsightCollection> {
        let prompt = build_insight_prompt(report);
        info!(
            "Generating insights with {} ({} prompt chars)",
            self.generator.model(),
            prompt.chars().count()
        );

        let request =
            GenerationRequest::new(SYSTEM_PROMPT_INSIGHTS, prompt, self.profiles.insight_synthesis);
        let raw = self.generator.generate(request).await?;
        let insights = parse_insight_array(&raw)?;
        log_shape(&insights);

        Ok(InsightCollection {
            period: period_of(report),
            generated_at: utc_timestamp(Utc::now()),
            insights,
        })
    }

    /// Translates every text field of `collection`, keeping its period.
    pub async fn translate_collection(
        &self,
        collection: &InsightCollection,
    ) -> Result<InsightCollection> {
        info!("Translating {} insights", collection.len());

        let payload = serde_json::to_string(&collection.insights)?;
        let prompt = format!("{}\n\n{}", INSIGHT_TRANSLATION_INSTRUCTIONS, payload);
        let request = GenerationRequest::new(
            SYSTEM_PROMPT_TRANSLATE_JSON,
            prompt,
            self.profiles.insight_translation,
        );
        let raw = self.generator.generate(request).await?;
        let insights = parse_insight_array(&raw)?;
        log_shape(&insights);

        Ok(InsightCollection {
            period: collection.period.clone(),
            generated_at: utc_timestamp(Utc::now()),
            insights,
        })
    }

    /// Runs both passes: source-language insights, then their translation.
    pub async fn synthesize_bilingual(
        &self,
        report: &Value,
    ) -> Result<(InsightCollection, InsightCollection)> {
        let source = self.synthesize(report).await?;
        let translated = self.translate_collection(&source).await?;
        Ok((source, translated))
    }
}

fn log_shape(insights: &[Value]) {
    for warning in shape_warnings(insights) {
        warn!("Insight shape: {}", warning);
    }
}

fn items<'v>(value: &'v Value, key: &str) -> impl Iterator<Item = &'v Value> {
    value
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

fn field(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
