use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialtyQuery {
    pub lpu_id: Option<String>,
}
