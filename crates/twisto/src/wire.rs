//! Raw XML schema of the Timeo endpoint
//!
//! Serde mirror of the wire format, element names kept as the endpoint
//! speaks them (French). Repeated elements collect into `Vec` fields, so a
//! record that appears once or many times decodes the same way. Everything
//! here is crate-private; the public surface exposes only normalized models.

use serde::Deserialize;

use crate::error::TransitError;

/// Error code the endpoint uses for "no error"
const NO_ERROR_CODE: &str = "000";

/// Top-level `<xmldata>` document, superset of all three response shapes
#[derive(Debug, Deserialize)]
pub(crate) struct RawDocument {
    /// `<erreur>` envelope, present on any response
    #[serde(rename = "erreur")]
    pub error: Option<RawError>,
    /// `<alss>` record list (lines and stops responses)
    #[serde(rename = "alss")]
    pub records: Option<RawRecords>,
    /// `<horaires>` schedule (arrivals response)
    #[serde(rename = "horaires")]
    pub schedules: Option<RawSchedules>,
}

/// `<erreur code="...">message</erreur>`
#[derive(Debug, Deserialize)]
pub(crate) struct RawError {
    #[serde(rename = "@code")]
    pub code: Option<String>,
    #[serde(rename = "$text")]
    pub message: Option<String>,
}

/// `<alss>` wrapper around repeated `<als>` records
#[derive(Debug, Deserialize)]
pub(crate) struct RawRecords {
    #[serde(default, rename = "als")]
    pub als: Vec<RawRecord>,
}

/// One `<als>` record; carries a line or a stop sub-record depending on query
#[derive(Debug, Deserialize)]
pub(crate) struct RawRecord {
    /// `<ligne>` sub-record (lines response)
    #[serde(rename = "ligne")]
    pub line: Option<RawLine>,
    /// `<arret>` sub-record (stops response)
    #[serde(rename = "arret")]
    pub stop: Option<RawStop>,
    /// `<refs>` token, sibling of `<arret>` rather than nested inside it
    #[serde(rename = "refs")]
    pub references: Option<String>,
}

/// `<ligne>` record: one direction of one line
#[derive(Debug, Deserialize)]
pub(crate) struct RawLine {
    #[serde(default)]
    pub code: String,
    #[serde(default, rename = "nom")]
    pub name: String,
    #[serde(default, rename = "couleur")]
    pub color: String,
    #[serde(default, rename = "sens")]
    pub direction: String,
    #[serde(default, rename = "vers")]
    pub destination: String,
}

/// `<arret>` record
#[derive(Debug, Deserialize)]
pub(crate) struct RawStop {
    #[serde(default)]
    pub code: String,
    #[serde(default, rename = "nom")]
    pub name: String,
}

/// `<horaires>` wrapper
#[derive(Debug, Deserialize)]
pub(crate) struct RawSchedules {
    #[serde(rename = "horaire")]
    pub entry: Option<RawScheduleEntry>,
}

/// `<horaire>` entry for the queried stop
#[derive(Debug, Deserialize)]
pub(crate) struct RawScheduleEntry {
    #[serde(rename = "passages")]
    pub passages: Option<RawPassages>,
}

/// `<passages>` wrapper around repeated `<passage>` records
#[derive(Debug, Deserialize)]
pub(crate) struct RawPassages {
    #[serde(default, rename = "passage")]
    pub passage: Vec<RawPassage>,
}

/// One `<passage>`: a predicted arrival
#[derive(Debug, Deserialize)]
pub(crate) struct RawPassage {
    /// "HH:MM" time-of-day, despite the element name
    #[serde(default, rename = "duree")]
    pub duration: String,
}

/// Decode a response body into the raw document
pub(crate) fn parse_document(body: &str) -> Result<RawDocument, TransitError> {
    quick_xml::de::from_str(body).map_err(|e| TransitError::Parse(e.to_string()))
}

/// Check the `<erreur>` envelope shared by all responses
///
/// Absence of the element, absence of its `code` attribute, and the code
/// "000" all mean "no error"; anything else is a remote application error.
pub(crate) fn check_remote_error(document: &RawDocument) -> Result<(), TransitError> {
    let Some(error) = &document.error else {
        return Ok(());
    };
    let Some(code) = &error.code else {
        return Ok(());
    };
    if code == NO_ERROR_CODE {
        return Ok(());
    }

    Err(TransitError::Remote {
        code: code.clone(),
        message: error
            .message
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lines_document() {
        let xml = r"<xmldata>
            <erreur code='000' />
            <alss>
                <als><ligne><code>01</code><nom>TRAM A</nom><couleur>255</couleur><sens>A</sens><vers>IFS Jean Vilar</vers></ligne></als>
                <als><ligne><code>01</code><nom>TRAM A</nom><couleur>255</couleur><sens>R</sens><vers>Caen Campus 2</vers></ligne></als>
            </alss>
        </xmldata>";

        let document = parse_document(xml).unwrap();
        assert!(check_remote_error(&document).is_ok());

        let records = document.records.unwrap();
        assert_eq!(records.als.len(), 2);
        let line = records.als[0].line.as_ref().unwrap();
        assert_eq!(line.code, "01");
        assert_eq!(line.name, "TRAM A");
        assert_eq!(line.direction, "A");
    }

    #[test]
    fn test_parse_single_record_collects_into_vec() {
        let xml = r"<xmldata>
            <alss>
                <als><ligne><code>05</code><nom>LIGNE 5</nom><couleur>16777215</couleur><sens>A</sens><vers>Banlieue</vers></ligne></als>
            </alss>
        </xmldata>";

        let document = parse_document(xml).unwrap();
        assert_eq!(document.records.unwrap().als.len(), 1);
    }

    #[test]
    fn test_parse_stops_document_reads_refs_from_outer_record() {
        let xml = r"<xmldata>
            <alss>
                <als><arret><code>CTHEA</code><nom>THEATRE</nom></arret><refs>411</refs></als>
            </alss>
        </xmldata>";

        let document = parse_document(xml).unwrap();
        let record = &document.records.unwrap().als[0];
        assert_eq!(record.stop.as_ref().unwrap().code, "CTHEA");
        assert_eq!(record.references.as_deref(), Some("411"));
    }

    #[test]
    fn test_parse_schedule_document() {
        let xml = r"<xmldata>
            <horaires>
                <horaire>
                    <passages>
                        <passage><duree>08:15</duree></passage>
                        <passage><duree>08:27</duree></passage>
                    </passages>
                </horaire>
            </horaires>
        </xmldata>";

        let document = parse_document(xml).unwrap();
        let passages = document
            .schedules
            .unwrap()
            .entry
            .unwrap()
            .passages
            .unwrap();
        assert_eq!(passages.passage.len(), 2);
        assert_eq!(passages.passage[0].duration, "08:15");
    }

    #[test]
    fn test_parse_invalid_xml() {
        let result = parse_document("not xml at all");
        assert!(matches!(result, Err(TransitError::Parse(_))));
    }

    #[test]
    fn test_error_envelope_with_failure_code() {
        let xml = "<xmldata><erreur code='010'>unknown line</erreur></xmldata>";
        let document = parse_document(xml).unwrap();
        let err = check_remote_error(&document).unwrap_err();
        match err {
            TransitError::Remote { code, message } => {
                assert_eq!(code, "010");
                assert_eq!(message, "unknown line");
            }
            other => panic!("expected Remote error, got {other:?}"),
        }
    }

    #[test]
    fn test_error_envelope_absent_means_no_error() {
        let xml = "<xmldata><alss><als /></alss></xmldata>";
        let document = parse_document(xml).unwrap();
        assert!(check_remote_error(&document).is_ok());
    }

    #[test]
    fn test_error_envelope_without_code_means_no_error() {
        let xml = "<xmldata><erreur>spurious</erreur></xmldata>";
        let document = parse_document(xml).unwrap();
        assert!(check_remote_error(&document).is_ok());
    }

    #[test]
    fn test_error_envelope_bare_element_has_empty_message() {
        let xml = "<xmldata><erreur code='045' /></xmldata>";
        let document = parse_document(xml).unwrap();
        let err = check_remote_error(&document).unwrap_err();
        match err {
            TransitError::Remote { code, message } => {
                assert_eq!(code, "045");
                assert!(message.is_empty());
            }
            other => panic!("expected Remote error, got {other:?}"),
        }
    }
}
