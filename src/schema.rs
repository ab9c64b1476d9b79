use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Number of insights requested per collection.
pub const INSIGHT_COUNT: usize = 7;

/// Period label used when the report carries no `date`.
pub const DEFAULT_PERIOD: &str = "today";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub enum InsightIcon {
    Building,
    Bot,
    Landmark,
    Brain,
    ShieldAlert,
    Layers,
    Globe,
    Shield,
    TrendingUp,
    Database,
}

impl InsightIcon {
    pub const ALL: [InsightIcon; 10] = [
        InsightIcon::Building,
        InsightIcon::Bot,
        InsightIcon::Landmark,
        InsightIcon::Brain,
        InsightIcon::ShieldAlert,
        InsightIcon::Layers,
        InsightIcon::Globe,
        InsightIcon::Shield,
        InsightIcon::TrendingUp,
        InsightIcon::Database,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InsightIcon::Building => "Building",
            InsightIcon::Bot => "Bot",
            InsightIcon::Landmark => "Landmark",
            InsightIcon::Brain => "Brain",
            InsightIcon::ShieldAlert => "ShieldAlert",
            InsightIcon::Layers => "Layers",
            InsightIcon::Globe => "Globe",
            InsightIcon::Shield => "Shield",
            InsightIcon::TrendingUp => "TrendingUp",
            InsightIcon::Database => "Database",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub enum AccentColor {
    #[serde(rename = "#22d3ee")]
    Cyan,
    #[serde(rename = "#f59e0b")]
    Amber,
    #[serde(rename = "#ec4899")]
    Pink,
    #[serde(rename = "#10b981")]
    Emerald,
    #[serde(rename = "#8b5cf6")]
    Violet,
    #[serde(rename = "#ef4444")]
    Red,
    #[serde(rename = "#06b6d4")]
    Teal,
}

impl AccentColor {
    pub const ALL: [AccentColor; 7] = [
        AccentColor::Cyan,
        AccentColor::Amber,
        AccentColor::Pink,
        AccentColor::Emerald,
        AccentColor::Violet,
        AccentColor::Red,
        AccentColor::Teal,
    ];

    pub fn hex(&self) -> &'static str {
        match self {
            AccentColor::Cyan => "#22d3ee",
            AccentColor::Amber => "#f59e0b",
            AccentColor::Pink => "#ec4899",
            AccentColor::Emerald => "#10b981",
            AccentColor::Violet => "#8b5cf6",
            AccentColor::Red => "#ef4444",
            AccentColor::Teal => "#06b6d4",
        }
    }
}

/// Education programs an insight can point the dashboard reader to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub enum ProgramKey {
    #[serde(rename = "aiShift")]
    AiShift,
    #[serde(rename = "intensiveAI")]
    IntensiveAi,
    #[serde(rename = "intensiveAgents")]
    IntensiveAgents,
    #[serde(rename = "dataDriven")]
    DataDriven,
    #[serde(rename = "ubnd")]
    Ubnd,
    #[serde(rename = "aiMarketing")]
    AiMarketing,
}

impl ProgramKey {
    pub const ALL: [ProgramKey; 6] = [
        ProgramKey::AiShift,
        ProgramKey::IntensiveAi,
        ProgramKey::IntensiveAgents,
        ProgramKey::DataDriven,
        ProgramKey::Ubnd,
        ProgramKey::AiMarketing,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ProgramKey::AiShift => "aiShift",
            ProgramKey::IntensiveAi => "intensiveAI",
            ProgramKey::IntensiveAgents => "intensiveAgents",
            ProgramKey::DataDriven => "dataDriven",
            ProgramKey::Ubnd => "ubnd",
            ProgramKey::AiMarketing => "aiMarketing",
        }
    }
}

/// The shape the dashboard expects for one strategic insight.
///
/// Generated insights are stored as raw JSON and only checked against this
/// type; see [`crate::insights::shape_warnings`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    #[schemars(description = "Ordinal number, 1-7")]
    pub id: u32,
    #[schemars(description = "Short, vivid headline in quotes")]
    pub title: String,
    #[schemars(description = "Subheading of 3-5 words")]
    pub subtitle: String,
    pub icon: InsightIcon,
    pub accent_color: AccentColor,
    #[schemars(description = "2-3 sentence description of the insight")]
    pub summary: String,
    #[schemars(description = "3-5 concrete facts or figures taken from the report")]
    pub evidence: Vec<String>,
    #[schemars(description = "Non-obvious conclusion, 2-3 sentences")]
    pub non_obvious_conclusion: String,
    #[schemars(description = "Implication for education programs, 1-2 sentences")]
    pub education_implication: String,
    pub relevant_programs: Vec<ProgramKey>,
}

/// Document written to `insights.json` / `insights.en.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct InsightCollection {
    /// Report date the insights were generated from.
    pub period: String,
    /// ISO-8601 UTC timestamp with a trailing `Z`.
    pub generated_at: String,
    #[schemars(with = "Vec<Insight>")]
    pub insights: Vec<serde_json::Value>,
}

impl InsightCollection {
    pub fn len(&self) -> usize {
        self.insights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.insights.is_empty()
    }
}

/// JSON Schema of [`InsightCollection`] as the dashboard consumes it.
pub fn insight_collection_schema() -> serde_json::Value {
    let schema = schemars::schema_for!(InsightCollection);
    serde_json::to_value(&schema).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_enum_string_forms_match_serde() {
        for icon in InsightIcon::ALL {
            assert_eq!(serde_json::to_value(icon).unwrap(), json!(icon.as_str()));
        }
        for color in AccentColor::ALL {
            assert_eq!(serde_json::to_value(color).unwrap(), json!(color.hex()));
        }
        for program in ProgramKey::ALL {
            assert_eq!(serde_json::to_value(program).unwrap(), json!(program.key()));
        }
    }

    #[test]
    fn test_insight_uses_dashboard_field_names() {
        let value = json!({
            "id": 1,
            "title": "«Великое перемещение стоимости»",
            "subtitle": "Капитал уходит в compute",
            "icon": "Landmark",
            "accentColor": "#f59e0b",
            "summary": "...",
            "evidence": ["a", "b", "c"],
            "nonObviousConclusion": "...",
            "educationImplication": "...",
            "relevantPrograms": ["aiShift", "intensiveAI"]
        });
        let insight: Insight = serde_json::from_value(value).unwrap();
        assert_eq!(insight.accent_color, AccentColor::Amber);
        assert_eq!(
            insight.relevant_programs,
            vec![ProgramKey::AiShift, ProgramKey::IntensiveAi]
        );
    }

    #[test]
    fn test_collection_schema_describes_insights() {
        let schema = insight_collection_schema();
        let text = schema.to_string();
        assert!(text.contains("generated_at"));
        assert!(text.contains("nonObviousConclusion"));
        assert!(text.contains("intensiveAgents"));
    }
}
