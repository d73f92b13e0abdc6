/*!
 * Prompt templates for the sections that may be rewritten by the model.
 *
 * Templates use `$name` (or `${name}`) placeholders. Names missing from the
 * substitution map are left untouched.
 */

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::BTreeMap;

use crate::sections::SectionType;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$(?:\{(\w+)\}|(\w+))").unwrap());

const FACTS_PROMPT: &str = r#"You are an expert legal writer specializing in civil rights litigation under 42 U.S.C. § 1983.

TASK: Transform the user's incident description into a professional "Statement of Facts" section for a federal civil rights complaint, while maintaining strict factual accuracy.

LEGAL REQUIREMENTS:
- Use formal legal writing style appropriate for federal court filings
- Write in past tense, third person ("Plaintiff was present...")
- Present facts chronologically
- Use precise, objective language
- Do NOT add facts not present in the user's description
- Do NOT make assumptions about intent, motive, or internal states
- Do NOT use emotional or inflammatory language
- PRESERVE all specific details (names, dates, locations, quotes)

TEMPLATE FRAMEWORK (preserve this legal structure):
$template_text

USER'S INCIDENT DESCRIPTION:
$user_description

CONTEXT DATA:
- Incident Date: $incident_date
- Incident Location: $incident_location
- Defendants: $defendants
- Violation Type: $violation_type
- Location Type: $location_type

OUTPUT INSTRUCTIONS:
1. Begin with date and location using the context data
2. Transform the user's description into professional legal narrative
3. Organize facts chronologically and logically
4. Include relevant legal characterizations from the template (e.g., "traditional public forum", "acting under color of state law")
5. End with a statement about the lawful nature of plaintiff's conduct
6. Length: 3-5 paragraphs, approximately 300-500 words

CRITICAL: Only include facts explicitly stated or clearly implied in the user's description. Do NOT fabricate details.

Output only the facts section content. Do not include headers, titles, or explanatory text."#;

const INTRODUCTION_PROMPT: &str = r#"You are an expert legal writer specializing in civil rights litigation under 42 U.S.C. § 1983.

TASK: Write a professional "Introduction" section for a federal civil rights complaint that summarizes the constitutional violations based on the user's incident.

LEGAL REQUIREMENTS:
- Keep it concise (2-3 sentences)
- Use formal legal writing style
- Reference the specific constitutional amendment(s) violated
- Reference 42 U.S.C. § 1983
- Do NOT add factual details beyond what the user described
- Use appropriate legal terminology

TEMPLATE FRAMEWORK:
$template_text

USER'S INCIDENT SUMMARY:
$user_description

VIOLATION TYPE: $violation_type
LOCATION TYPE: $location_type

OUTPUT INSTRUCTIONS:
1. Start with a clear statement that this is a civil rights action under § 1983
2. Identify which constitutional rights were violated (First Amendment, Fourth Amendment, etc.)
3. Briefly characterize the defendant's conduct (e.g., "unlawful interference", "retaliatory conduct", "prior restraint")
4. Mention the relief sought (damages and injunctive relief)
5. Length: 2-4 sentences maximum

CRITICAL: Be specific about which constitutional rights were violated based on the violation type, but do NOT add factual details.

Output only the introduction text. Do not include section headers or titles."#;

const CLAIMS_PROMPT: &str = r#"You are an expert legal writer specializing in federal civil rights litigation under 42 U.S.C. § 1983.

TASK: Enhance the "Claims for Relief" section by integrating specific facts from the user's incident into the existing legal framework and citations.

CRITICAL LEGAL REQUIREMENTS:
- PRESERVE ALL case citations exactly as provided in the template (e.g., "Glik v. Cunniffe, 655 F.3d 78 (1st Cir. 2011)")
- PRESERVE ALL legal standards and tests (e.g., "strict scrutiny", "clearly established")
- PRESERVE ALL statutory references (e.g., "42 U.S.C. § 1983")
- Do NOT add new case citations
- Do NOT change legal standards
- Do NOT fabricate legal arguments

YOUR ROLE: Weave the user's specific factual allegations into the existing legal framework.

TEMPLATE WITH LEGAL FRAMEWORK (preserve all citations and standards):
$template_text

USER'S FACTUAL ALLEGATIONS:
$user_description

CONTEXT:
- Violation Type: $violation_type
- Location Type: $location_type
- Defendants: $defendants

OUTPUT INSTRUCTIONS:
1. Keep the COUNT heading exactly as provided in template
2. Keep all case citations and legal standards from the template
3. Add 1-2 sentences referencing the specific facts from the user's description
4. Maintain the legal analysis structure from the template
5. End with the constitutional standard (e.g., strict scrutiny) from the template
6. Length: Keep similar to template length (approximately 150-300 words)

Output only the claims section content. Do not include section headers."#;

const PARTIES_PROMPT: &str = r#"You are an expert legal writer for federal civil rights complaints under 42 U.S.C. § 1983.

TASK: Write a professional "Parties" section that describes the plaintiff and defendants with appropriate legal formality.

LEGAL REQUIREMENTS:
- Identify plaintiff's citizenship and residency
- Identify defendants by name and official capacity
- Include "acting under color of state law" for government defendants
- Use formal, objective language
- Do NOT add titles, badge numbers, or details not provided by the user
- Do NOT make assumptions about defendants' roles

TEMPLATE FRAMEWORK:
$template_text

CONTEXT DATA:
- Plaintiff Name: $plaintiff_name
- Plaintiff State: $plaintiff_state
- Defendants: $defendants

OUTPUT INSTRUCTIONS:
1. First paragraph: Describe plaintiff (name, citizenship, residency)
2. Second paragraph: Describe defendants based on information provided
3. For law enforcement defendants, include "acting under color of state law"
4. If specific titles/positions are provided, use them; otherwise, use general description
5. Length: 2-3 sentences total

CRITICAL: Only use defendant information explicitly provided. Do not invent badge numbers, specific titles, or organizational details.

Output only the parties section content."#;

/// Prompt template for a section, if the section has one
pub fn prompt_template(section_type: &str) -> Option<&'static str> {
    match section_type.parse::<SectionType>().ok()? {
        SectionType::Facts => Some(FACTS_PROMPT),
        SectionType::Introduction => Some(INTRODUCTION_PROMPT),
        SectionType::Claims => Some(CLAIMS_PROMPT),
        SectionType::Parties => Some(PARTIES_PROMPT),
        _ => None,
    }
}

/// Replace `$name` and `${name}` placeholders from the map
pub fn substitute(template: &str, values: &BTreeMap<&str, String>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            let name = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str())
                .unwrap_or_default();
            match values.get(name) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
