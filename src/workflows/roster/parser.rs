use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
pub(crate) struct StudentRow {
    #[serde(rename = "Student ID")]
    pub(crate) id: String,
    #[serde(rename = "Name")]
    pub(crate) name: String,
    #[serde(rename = "Credential")]
    pub(crate) credential: String,
    #[serde(rename = "Year")]
    pub(crate) year: String,
    #[serde(rename = "Major")]
    pub(crate) major: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RepresentativeRow {
    #[serde(rename = "Rep ID")]
    pub(crate) id: String,
    #[serde(rename = "Name")]
    pub(crate) name: String,
    #[serde(rename = "Credential")]
    pub(crate) credential: String,
    #[serde(rename = "Company")]
    pub(crate) company: String,
    #[serde(rename = "Department")]
    pub(crate) department: String,
    #[serde(rename = "Position")]
    pub(crate) position: String,
    #[serde(rename = "Account Status")]
    pub(crate) account_status: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StaffRow {
    #[serde(rename = "Staff ID")]
    pub(crate) id: String,
    #[serde(rename = "Name")]
    pub(crate) name: String,
    #[serde(rename = "Credential")]
    pub(crate) credential: String,
    #[serde(rename = "Department")]
    pub(crate) department: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpportunityRow {
    #[serde(rename = "Opportunity ID")]
    pub(crate) id: String,
    #[serde(rename = "Representative")]
    pub(crate) representative: String,
    #[serde(rename = "Title")]
    pub(crate) title: String,
    #[serde(rename = "Description", default)]
    pub(crate) description: String,
    #[serde(rename = "Preferred Major")]
    pub(crate) preferred_major: String,
    #[serde(rename = "Level")]
    pub(crate) level: String,
    #[serde(rename = "Opens")]
    pub(crate) opens: String,
    #[serde(rename = "Closes")]
    pub(crate) closes: String,
    #[serde(rename = "Slots")]
    pub(crate) slots: String,
    #[serde(rename = "Status", default)]
    pub(crate) status: String,
}

pub(crate) fn parse_rows<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    csv_reader.deserialize().collect()
}
