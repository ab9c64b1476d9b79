// System prompts for the translation and insight requests.

pub const SYSTEM_PROMPT_TRANSLATE_TEXT: &str = "You are a professional translator. \
Translate the following Russian text to English. \
Keep technical terms, company names, and abbreviations as-is. \
Return ONLY the translation, nothing else.";

pub const SYSTEM_PROMPT_TRANSLATE_BATCH: &str = "You are a professional translator. \
Translate each numbered Russian text to English. \
Keep technical terms, company names, and abbreviations as-is. \
Return translations in the same numbered format [N] translation. \
Return ONLY the translations.";

pub const SYSTEM_PROMPT_INSIGHTS: &str = "Ты — аналитик стратегической разведки в области AI. \
Генерируй глубокие, неочевидные инсайты на основе данных. \
Отвечай ТОЛЬКО валидным JSON.";

pub const SYSTEM_PROMPT_TRANSLATE_JSON: &str =
    "You are a professional translator. Return ONLY valid JSON.";

/// Instructions wrapped around the serialized insight array for the English pass.
pub const INSIGHT_TRANSLATION_INSTRUCTIONS: &str = "Translate the following JSON array of strategic insights from Russian to English. \n\
Keep the JSON structure exactly the same. Translate all text fields (title, subtitle, summary, evidence items, nonObviousConclusion, educationImplication).\n\
Keep field names, numbers, company names, and program keys (like aiShift, intensiveAI etc) unchanged.\n\
Return ONLY valid JSON array.";

/// Word used for a missing report date inside the Russian insight prompt.
pub const PROMPT_DEFAULT_DATE: &str = "сегодня";
