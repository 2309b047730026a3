/// Wraps the plain-text report brief in the instructions sent to the model.
pub fn build_prompt(brief: &str) -> String {
    format!(
        "As a real estate investment analyst, review the following property and its \
financial figures.\n\n\
{}\n\n\
Please provide:\n\
1. An overall assessment of the investment opportunity\n\
2. Specific strengths of this property investment\n\
3. Potential risks or areas of concern\n\
4. Recommendations for improving the investment's performance\n\
5. A comparison with typical market standards\n",
        brief.trim_end()
    )
}
