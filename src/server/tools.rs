use serde::Serialize;
use serde_json::{Value, json};
use strum::{Display, EnumString};

/// The closed set of tool names the dispatcher recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum ToolName {
    #[strum(serialize = "refinePrompt")]
    RefinePrompt,
    #[strum(serialize = "saveVariant")]
    SaveVariant,
    #[strum(serialize = "getDiff")]
    GetDiff,
    #[strum(serialize = "acceptVariant")]
    AcceptVariant,
    #[strum(serialize = "getHistory")]
    GetHistory,
    #[strum(serialize = "showVariants")]
    ShowVariants,
}

/// Entry in the static tool catalog advertised by `tools/list`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

pub fn catalog() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            name: "refinePrompt",
            description: "Takes a prompt, generates 4 refined variants (concise, detailed, \
                          creative, analytical), saves them all, and returns them together \
                          with a renderable view record.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "prompt": {
                        "type": "string",
                        "description": "The original prompt to refine"
                    }
                },
                "required": ["prompt"]
            }),
        },
        ToolDescriptor {
            name: "saveVariant",
            description: "Persists one externally generated styled rewrite of a stored prompt.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "promptId": {
                        "type": "integer",
                        "description": "Id of the stored prompt"
                    },
                    "style": {
                        "type": "string",
                        "enum": ["concise", "detailed", "creative", "analytical"],
                        "description": "Rewrite style of the variant"
                    },
                    "refinedText": {
                        "type": "string",
                        "description": "The rewritten prompt text"
                    }
                },
                "required": ["promptId", "style", "refinedText"]
            }),
        },
        ToolDescriptor {
            name: "getDiff",
            description: "Computes a positional line diff between a stored prompt and one of \
                          its variants.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "promptId": {
                        "type": "integer",
                        "description": "Id of the stored prompt"
                    },
                    "variantId": {
                        "type": "integer",
                        "description": "Id of the variant to compare against"
                    }
                },
                "required": ["promptId", "variantId"]
            }),
        },
        ToolDescriptor {
            name: "acceptVariant",
            description: "Records the user's acceptance of one variant as final.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "variantId": {
                        "type": "integer",
                        "description": "Id of the accepted variant"
                    }
                },
                "required": ["variantId"]
            }),
        },
        ToolDescriptor {
            name: "getHistory",
            description: "Retrieves recent refinements, most recent first, with variants and \
                          acceptance marks.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "limit": {
                        "type": "integer",
                        "description": "Maximum number of records to return (default 20)"
                    }
                }
            }),
        },
        ToolDescriptor {
            name: "showVariants",
            description: "Returns a renderable view record for the already saved variants of \
                          one prompt.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "promptId": {
                        "type": "integer",
                        "description": "Id of the stored prompt"
                    }
                },
                "required": ["promptId"]
            }),
        },
    ]
}
