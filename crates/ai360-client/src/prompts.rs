//! Prompts, system instructions, and response schemas sent to Gemini.

use ai360_core::analysis::DiagnosisResult;
use ai360_core::profile::UserProfile;
use serde_json::{Value, json};

pub const DIAGNOSIS_PROMPT: &str = r#"Analyze this medical image (Eye, Skin, Lung X-ray, or Brain MRI).
Identify potential diseases, the probability of the finding, and the severity.
Provide a brief medical-style explanation and 3 recommendations.
Return ONLY a JSON object matching this structure:
{
  "disease": "string",
  "probability": number (0-100),
  "severity": "Low" | "Medium" | "High",
  "explanation": "string",
  "recommendations": ["string", "string", "string"]
}"#;

pub const DIAGNOSIS_INSTRUCTION: &str = "You are a senior AI radiologist and dermatologist assistant. Be precise and objective. Always mention you are an AI assistant.";

pub const REPORT_PROMPT: &str = r#"Perform OCR on this blood report and analyze markers like Hemoglobin, RBC, WBC, Sugar, Cholesterol, Liver, and Kidney markers.
Return a summary of the report, a list of detected markers with their status (Normal, Borderline, Abnormal), and advice.
Return ONLY a JSON object matching this structure:
{
  "summary": "string",
  "markers": [
    { "name": "string", "value": "string", "status": "Normal" | "Borderline" | "Abnormal", "meaning": "string" }
  ],
  "advice": "string"
}"#;

pub const REPORT_INSTRUCTION: &str = "You are an expert hematologist assistant. Simplify complex terms for patients while remaining accurate.";

pub const PREDICTION_INSTRUCTION: &str = "You are a preventive medicine expert. Identify long-term trends and risks based on patient data. Provide highly organized, professional clinical assessments without markdown artifacts.";

/// First message shown in a new chat.
pub const CHAT_GREETING: &str = "Hello. I am your AI Health Assistant. How can I help you today? Please remember I am not a medical professional.";

/// Shown in place of an answer when the assistant call fails.
pub const CHAT_FAILURE_REPLY: &str = "I'm sorry, I encountered an issue connecting to my medical intelligence engine. Please try again.";

/// Suggested openers offered before the first question.
pub const QUICK_ACTIONS: [&str; 4] = [
    "Explain my last report",
    "What are early signs of hypertension?",
    "Healthy diet for heart health",
    "Understanding cholesterol levels",
];

const CHAT_RULES: &str = "CORE RULES:
1. AUTOMATIC LANGUAGE MATCHING: Respond in the exact language of the user.
2. FORMATTING: Use **Double Asterisks** for headings and critical vulnerabilities.
3. CLEANLINESS: NEVER use single asterisks (*) for bullet points or lists. Use plain dashes (-) or simple new lines.
4. Maintain a professional, minimalist, and clinical tone.
5. MANDATORY DISCLAIMER: Every response must imply you are an AI assistant and not a medical professional.";

/// System instruction for a chat session with `profile`.
#[must_use]
pub fn chat_system_prompt(profile: &UserProfile) -> String {
    let or_unknown = |v: &Option<String>| v.clone().unwrap_or_else(|| "unknown".to_string());
    format!(
        "You are a professional medical assistant chatbot.\nUser Profile: {}, Age: {}, Goal: {}.\n\n{CHAT_RULES}",
        profile.name,
        or_unknown(&profile.age),
        or_unknown(&profile.goal),
    )
}

/// Forecast prompt embedding the profile and an optional recent diagnosis.
#[must_use]
pub fn prediction_prompt(profile: &UserProfile, diagnosis: Option<&DiagnosisResult>) -> String {
    let user = serde_json::to_string(profile).unwrap_or_else(|_| "{}".to_string());
    let recent = diagnosis
        .and_then(|d| serde_json::to_string(d).ok())
        .unwrap_or_else(|| "\"None\"".to_string());
    format!(
        "Based on this user profile: {user}\n\
         and recent diagnosis: {recent},\n\
         predict future disease risks and early warning signs.\n\
         Focus on preventive care.\n\
         MANDATORY: Return a clean structured JSON. DO NOT use asterisks, markdown, or bullet points in the strings.\n\
         Use \"isHighPriority\": true for anything that is particularly vulnerable or needs immediate attention."
    )
}

#[must_use]
pub fn diagnosis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "disease": { "type": "STRING" },
            "probability": { "type": "NUMBER" },
            "severity": { "type": "STRING" },
            "explanation": { "type": "STRING" },
            "recommendations": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "propertyOrdering": ["disease", "probability", "severity", "explanation", "recommendations"]
    })
}

#[must_use]
pub fn report_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING" },
            "markers": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "value": { "type": "STRING" },
                        "status": { "type": "STRING" },
                        "meaning": { "type": "STRING" }
                    }
                }
            },
            "advice": { "type": "STRING" }
        },
        "propertyOrdering": ["summary", "markers", "advice"]
    })
}

#[must_use]
pub fn prediction_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING" },
            "riskCategories": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "category": { "type": "STRING" },
                        "items": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "heading": { "type": "STRING" },
                                    "description": { "type": "STRING" },
                                    "isHighPriority": { "type": "BOOLEAN" }
                                }
                            }
                        }
                    }
                }
            },
            "monitoringSigns": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "sign": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "urgency": { "type": "STRING" }
                    }
                }
            }
        }
    })
}
