/// One step of a workflow as authored in the workflow document.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Step {
    #[serde(rename = "stepId")]
    pub step_id: String,

    /// Endpoint id this step invokes. Arazzo documents spell it `operationId`.
    #[serde(rename = "call", alias = "operationId")]
    pub call: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "preHook")]
    pub pre_hook: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "postHook")]
    pub post_hook: Option<String>,

    /// Successor step ids. Kept as data; never interpreted by the compiler.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub next: Vec<String>,
}

impl Step {
    pub fn new(step_id: impl Into<String>, call: impl Into<String>) -> Self {
        Self {
            step_id: step_id.into(),
            call: call.into(),
            pre_hook: None,
            post_hook: None,
            next: Vec::new(),
        }
    }

    pub fn with_hooks(mut self, pre: Option<&str>, post: Option<&str>) -> Self {
        self.pre_hook = pre.map(String::from);
        self.post_hook = post.map(String::from);
        self
    }

    pub fn with_next<I, S>(mut self, next: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.next = next.into_iter().map(Into::into).collect();
        self
    }
}
