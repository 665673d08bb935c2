//! Prompt construction

use finai_types::Transaction;
use std::fmt::Write;

/// System message sent with every analysis request
pub const SYSTEM_PROMPT: &str = "You are an expert financial advisor. You always answer with valid JSON, \
without markdown and without any additional text.";

const INSTRUCTIONS: &str = "\
INSTRUCTIONS:
1. Identify spending patterns
2. Detect duplicated or unnecessary subscriptions
3. Calculate the total spent
4. Suggest 4 actionable insights (100 characters maximum each)
5. Identify areas where money can be saved";

const RESPONSE_FORMAT: &str = r#"RESPONSE FORMAT (strict JSON):
{
  "totalSpent": "number as a string",
  "subscriptions": number of subscriptions found,
  "subscriptionCost": "total subscription cost as a string",
  "predictions": {
    "nextMonth": "predicted spend for next month",
    "savings": "estimated potential savings"
  },
  "insights": [
    "insight 1",
    "insight 2",
    "insight 3",
    "insight 4"
  ],
  "duplicates": [
    {
      "name": "Name of the group of duplicated services",
      "count": number of services,
      "saving": potential saving as a number
    }
  ]
}"#;

/// Build the user prompt for a batch of transactions
///
/// One line per transaction, `- {description}: ${amount} ({category})`,
/// followed by the fixed instructions and response format.
pub fn build_prompt(transactions: &[Transaction]) -> String {
    let mut prompt = String::from(
        "You are an expert financial advisor. Analyze these transactions and provide:\n\nTRANSACTIONS:\n",
    );

    for t in transactions {
        // Writing to a String cannot fail
        let _ = writeln!(prompt, "- {}: ${} ({})", t.description, t.amount, t.category);
    }

    prompt.push('\n');
    prompt.push_str(INSTRUCTIONS);
    prompt.push_str("\n\n");
    prompt.push_str(RESPONSE_FORMAT);
    prompt.push_str("\n\nANSWER ONLY WITH THE JSON, WITHOUT ADDITIONAL TEXT.\n");
    prompt
}
