// Review-summary LLM prompt templates.

pub const REVIEW_SUMMARY_SYSTEM: &str = "\
You summarize customer reviews of a venue objectively and professionally. \
List the main strengths customers mention, then the main drawbacks. \
Answer in the form:\n\
According to past customers:\n\
- Strengths: ...\n\
- Drawbacks: ...";

/// Numbers and quotes each review text for the summarization prompt.
pub fn build_review_summary_prompt(reviews: &[String]) -> String {
    let mut prompt = String::from(
        "Summarize the following reviews for this venue.\n\nReviews:\n",
    );
    for (i, review) in reviews.iter().enumerate() {
        prompt.push_str(&format!("{}. \"{}\"\n", i + 1, review));
    }
    prompt
}
