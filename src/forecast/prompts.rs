// Prompt templates for oracle interactions
//
// Templates are versioned so a stored prediction can be traced back to the
// exact wording that produced it.

use std::collections::HashMap;

use crate::domain::crowd::CrowdSample;
use crate::domain::visitor_log::VisitorLog;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const NO_CROWD_DATA: &str = "No crowd data available for the last 30 days.";
pub const NO_VISITOR_LOGS: &str = "No visitor log data available for the last 30 days.";

/// Prompt template structure
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub name: String,
    pub version: String,
    pub system: String,
    pub user_template: String,
}

impl PromptTemplate {
    /// Render the user template with variables
    ///
    /// Substitution is a single left-to-right pass over the template:
    /// `{{name}}` is replaced by its value, substituted values are never
    /// scanned again, and unknown placeholders are kept verbatim.
    ///
    /// # Example
    /// ```
    /// use std::collections::HashMap;
    /// use smartqueue_api::forecast::prompts::PromptTemplate;
    ///
    /// let template = PromptTemplate {
    ///     name: "greeting".to_string(),
    ///     version: "1.0.0".to_string(),
    ///     system: String::new(),
    ///     user_template: "Hello {{name}}, {{unknown}}".to_string(),
    /// };
    /// let vars = HashMap::from([("name", "{{unknown}}".to_string())]);
    ///
    /// assert_eq!(template.render(&vars), "Hello {{unknown}}, {{unknown}}");
    /// ```
    pub fn render(&self, variables: &HashMap<&str, String>) -> String {
        let mut out = String::with_capacity(self.user_template.len());
        let mut rest = self.user_template.as_str();

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];

            let Some(end) = after.find("}}") else {
                out.push_str(&rest[start..]);
                return out;
            };

            match variables.get(after[..end].trim()) {
                Some(value) => out.push_str(value),
                None => out.push_str(&rest[start..start + end + 4]),
            }
            rest = &after[end + 2..];
        }

        out.push_str(rest);
        out
    }
}

pub mod library {
    use super::PromptTemplate;

    pub fn wait_time_prediction() -> PromptTemplate {
        PromptTemplate {
            name: "wait_time_prediction".to_string(),
            version: "1.0.0".to_string(),
            system: "You are a helpful assistant that provides wait time predictions in JSON format."
                .to_string(),
            user_template: "You are a predictive model estimating how long a visitor will wait \
                            before receiving service at an institution such as a bank, restaurant, \
                            park or corporate office. Base your estimate on the historical visit \
                            records collected from the branch below.\n\n\
                            The branch name is {{branch_name}}, and it can hold a NORMAL capacity \
                            of {{branch_capacity}} people before it is considered crowded (NORMAL \
                            capacity means all or some of its service points may be occupied at \
                            a given time).\n\n\
                            Crowd counts recorded at this branch during the last 30 days:\n\
                            {{crowd_data}}\n\n\
                            Visitor logs recorded at this branch during the last 30 days:\n\
                            {{visitor_logs}}\n\n\
                            Using this data, estimate the visitor's waiting time, which we store \
                            as PredictedWaitTime. Respond with a JSON object with exactly these \
                            fields:\n\n\
                            {\n    \"predictedWaitTime\": int,\n    \"actualWaitTime\": int,\n    \
                            \"accuracy\": float\n}\n\n\
                            If little data is provided, rely on general knowledge of similar \
                            institutions to produce a plausible time. Do not invent records, and \
                            do not give a time far from the average wait time."
                .to_string(),
        }
    }
}

/// Renders branch history into the oracle instruction text
///
/// Pure: identical inputs always yield byte-identical output.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    template: PromptTemplate,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::with_template(library::wait_time_prediction())
    }

    pub fn with_template(template: PromptTemplate) -> Self {
        Self { template }
    }

    /// System instruction sent alongside every prompt
    pub fn system_prompt(&self) -> &str {
        &self.template.system
    }

    pub fn template(&self) -> &PromptTemplate {
        &self.template
    }

    /// Build the user prompt; entries are rendered in the order given
    pub fn build(
        &self,
        branch_name: &str,
        branch_capacity: i32,
        crowd_samples: &[CrowdSample],
        visitor_logs: &[VisitorLog],
    ) -> String {
        let variables = HashMap::from([
            ("branch_name", branch_name.to_string()),
            ("branch_capacity", branch_capacity.to_string()),
            ("crowd_data", render_crowd_samples(crowd_samples)),
            ("visitor_logs", render_visitor_logs(visitor_logs)),
        ]);

        self.template.render(&variables)
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn render_crowd_samples(samples: &[CrowdSample]) -> String {
    if samples.is_empty() {
        return NO_CROWD_DATA.to_string();
    }

    samples
        .iter()
        .map(|s| {
            format!(
                "Date - {} - Crowd Count - {}",
                s.recorded_at.format(TIMESTAMP_FORMAT),
                s.crowd_count
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_visitor_logs(logs: &[VisitorLog]) -> String {
    if logs.is_empty() {
        return NO_VISITOR_LOGS.to_string();
    }

    logs.iter()
        .map(|log| {
            format!(
                "Visitor Name - {} - Check In time - {} - Service Start Time - {} - Waited for - {} minutes",
                log.visitor_name(),
                log.check_in_time().format(TIMESTAMP_FORMAT),
                log.service_start_time().format(TIMESTAMP_FORMAT),
                log.wait_time_minutes()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
