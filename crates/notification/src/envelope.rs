//! Notification envelope model and payload resolution.
//!
//! An [`Envelope`] is the SNS-style `Records` wrapper delivered to the relay.
//! Only the first [`WrappedMessage`] is consulted. Its `Message` field is the
//! [`Payload`], which producers send either as a JSON-encoded string or as an
//! inline object; the JSON shape alone selects the decode path.
//!
//! Decoding is tolerant by construction: every metadata field defaults when
//! absent, and [`extract_state`] converts any resolution failure into
//! [`PipelineState::Unknown`] instead of an error.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::{ExecutionId, MessageId, PayloadError, PipelineName, PipelineState, TopicArn};

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// Outer notification wrapper.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Wrapped messages in delivery order. A missing `Records` key is empty.
    #[serde(rename = "Records", default)]
    pub records: Vec<WrappedMessage>,
}

impl Envelope {
    /// Decodes an envelope from raw request bytes.
    pub fn from_slice(body: &[u8]) -> Result<Self, PayloadError> {
        serde_json::from_slice(body).map_err(PayloadError::MalformedEnvelope)
    }

    /// Decodes an envelope from an already-parsed JSON document.
    pub fn from_value(value: Value) -> Result<Self, PayloadError> {
        serde_json::from_value(value).map_err(PayloadError::MalformedEnvelope)
    }

    /// Returns the first wrapped message, if any.
    pub fn first(&self) -> Option<&WrappedMessage> {
        self.records.first()
    }

    /// Returns the payload of the first wrapped message, if any.
    pub fn first_payload(&self) -> Option<Payload<'_>> {
        self.first().map(|record| record.sns.payload())
    }
}

/// One delivered notification record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WrappedMessage {
    pub event_source: Option<String>,
    pub event_version: Option<String>,
    pub event_subscription_arn: Option<String>,
    pub sns: SnsMessage,
}

/// Topic message carried inside a [`WrappedMessage`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SnsMessage {
    #[serde(rename = "Type")]
    pub kind: Option<String>,
    pub message_id: Option<MessageId>,
    pub topic_arn: Option<TopicArn>,
    pub subject: Option<String>,
    /// Raw `Message` field. Interpreted through [`SnsMessage::payload`].
    pub message: Value,
    pub timestamp: Option<String>,
    pub signature_version: Option<String>,
    pub signature: Option<String>,
    #[serde(rename = "SigningCertURL")]
    pub signing_cert_url: Option<String>,
    #[serde(rename = "UnsubscribeURL")]
    pub unsubscribe_url: Option<String>,
    pub message_attributes: Value,
}

impl SnsMessage {
    /// Classifies the `Message` field by its JSON shape.
    pub fn payload(&self) -> Payload<'_> {
        match &self.message {
            Value::String(encoded) => Payload::Encoded(encoded),
            inline @ Value::Object(_) => Payload::Inline(inline),
            _ => Payload::Absent,
        }
    }
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// The message payload, tagged by the shape the producer used.
///
/// The variants are mutually exclusive: a string is only ever decoded as
/// encoded JSON and an object is only ever decoded in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payload<'a> {
    /// A JSON document encoded as a string.
    Encoded(&'a str),
    /// A JSON object holding the status record directly.
    Inline(&'a Value),
    /// Missing, `null`, or a JSON type that cannot hold a record.
    Absent,
}

impl Payload<'_> {
    /// Decodes the payload into a [`PipelineStatusRecord`].
    pub fn resolve(&self) -> Result<PipelineStatusRecord, PayloadError> {
        match self {
            Payload::Encoded(encoded) => {
                serde_json::from_str(encoded).map_err(PayloadError::MalformedRecord)
            }
            Payload::Inline(value) => {
                PipelineStatusRecord::deserialize(*value).map_err(PayloadError::MalformedRecord)
            }
            Payload::Absent => Err(PayloadError::MissingPayload),
        }
    }
}

// ---------------------------------------------------------------------------
// Pipeline status record
// ---------------------------------------------------------------------------

/// Pipeline execution state-change notification.
///
/// Only [`PipelineDetail::state`] is acted upon; everything else is carried for
/// logging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineStatusRecord {
    pub account: Option<String>,
    pub detail_type: Option<String>,
    pub region: Option<String>,
    pub source: Option<String>,
    pub time: Option<String>,
    pub notification_rule_arn: Option<String>,
    pub detail: PipelineDetail,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct PipelineDetail {
    pub pipeline: Option<PipelineName>,
    pub execution_id: Option<ExecutionId>,
    pub execution_trigger: ExecutionTrigger,
    /// Raw state string. `None` and `""` both classify as an empty
    /// [`PipelineState::Other`].
    pub state: Option<String>,
    pub version: Option<f64>,
}

impl PipelineDetail {
    /// Classifies the reported state.
    pub fn state(&self) -> PipelineState {
        PipelineState::parse(self.state.as_deref().unwrap_or_default())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ExecutionTrigger {
    pub trigger_type: Option<String>,
    pub trigger_detail: Option<String>,
}

// ---------------------------------------------------------------------------
// State extraction
// ---------------------------------------------------------------------------

/// Resolves the pipeline state reported by the first message of `envelope`.
///
/// Returns `None` when the envelope holds no messages. Any failure to decode
/// the first payload is logged and yields [`PipelineState::Unknown`].
pub fn extract_state(envelope: &Envelope) -> Option<PipelineState> {
    let payload = envelope.first_payload()?;

    let state = match payload.resolve() {
        Ok(record) => {
            let detail = &record.detail;
            info!(
                pipeline = detail.pipeline.as_ref().map(PipelineName::as_str),
                execution_id = detail.execution_id.as_ref().map(ExecutionId::as_str),
                "Resolved pipeline status record"
            );
            detail.state()
        }
        Err(err) => {
            warn!(error = %err, "Pipeline status record unavailable; treating state as unknown");
            PipelineState::Unknown
        }
    };

    info!(state = %state, "Pipeline state");
    Some(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record_json(state: &str) -> Value {
        json!({
            "account": "123456789012",
            "detailType": "CodePipeline Pipeline Execution State Change",
            "region": "eu-north-1",
            "source": "aws.codepipeline",
            "time": "2024-01-08T10:12:44Z",
            "notificationRuleArn": "arn:aws:codestar-notifications:eu-north-1:123456789012:notificationrule/abc",
            "detail": {
                "pipeline": "agency-pipeline",
                "execution-id": "0d1ab5a6-1c2b-4f7a-9d57-1f2e5d1c9a10",
                "execution-trigger": {
                    "trigger-type": "StartPipelineExecution",
                    "trigger-detail": "arn:aws:sts::123456789012:assumed-role/deployer"
                },
                "state": state,
                "version": 3.0
            }
        })
    }

    fn envelope_with_message(message: Value) -> Envelope {
        Envelope::from_value(json!({
            "Records": [{
                "EventSource": "aws:sns",
                "EventVersion": "1.0",
                "EventSubscriptionArn": "arn:aws:sns:eu-north-1:123456789012:pipeline-events:sub",
                "Sns": {
                    "Type": "Notification",
                    "MessageId": "95df01b4-ee98-5cb9-9903-4c221d41eb5e",
                    "TopicArn": "arn:aws:sns:eu-north-1:123456789012:pipeline-events",
                    "Subject": null,
                    "Message": message,
                    "Timestamp": "2024-01-08T10:12:45.000Z",
                    "SignatureVersion": "1",
                    "Signature": "EXAMPLE",
                    "SigningCertURL": "https://sns.eu-north-1.amazonaws.com/cert.pem",
                    "UnsubscribeURL": "https://sns.eu-north-1.amazonaws.com/unsubscribe",
                    "MessageAttributes": {}
                }
            }]
        }))
        .unwrap()
    }

    #[test]
    fn string_message_is_encoded_payload() {
        let encoded = record_json("SUCCEEDED").to_string();
        let envelope = envelope_with_message(Value::String(encoded.clone()));

        assert_eq!(envelope.first_payload(), Some(Payload::Encoded(&encoded)));
    }

    #[test]
    fn object_message_is_inline_payload() {
        let envelope = envelope_with_message(record_json("FAILED"));

        assert!(matches!(envelope.first_payload(), Some(Payload::Inline(_))));
    }

    #[test]
    fn other_json_types_are_absent_payload() {
        for message in [Value::Null, json!(42), json!(true), json!(["SUCCEEDED"])] {
            let envelope = envelope_with_message(message);
            assert_eq!(envelope.first_payload(), Some(Payload::Absent));
        }
    }

    #[test]
    fn encoded_payload_resolves_metadata() {
        let encoded = record_json("SUCCEEDED").to_string();
        let record = Payload::Encoded(&encoded).resolve().unwrap();

        assert_eq!(record.region.as_deref(), Some("eu-north-1"));
        assert_eq!(record.detail.pipeline.unwrap().as_str(), "agency-pipeline");
        assert_eq!(
            record.detail.execution_trigger.trigger_type.as_deref(),
            Some("StartPipelineExecution")
        );
        assert_eq!(record.detail.version, Some(3.0));
    }

    #[test]
    fn encoded_payload_that_is_itself_an_encoded_string_is_malformed() {
        // A doubly-encoded record decodes to a JSON string, not an object.
        let doubly = Value::String(record_json("SUCCEEDED").to_string()).to_string();
        let err = Payload::Encoded(&doubly).resolve().unwrap_err();

        assert!(matches!(err, PayloadError::MalformedRecord(_)));
    }

    #[test]
    fn inline_payload_resolves_state() {
        let value = record_json("STARTED");
        let record = Payload::Inline(&value).resolve().unwrap();

        assert_eq!(record.detail.state(), PipelineState::Started);
    }

    #[test]
    fn absent_payload_fails_to_resolve() {
        assert!(matches!(
            Payload::Absent.resolve(),
            Err(PayloadError::MissingPayload)
        ));
    }

    #[test]
    fn missing_records_key_is_empty_envelope() {
        let envelope = Envelope::from_slice(b"{}").unwrap();

        assert!(envelope.records.is_empty());
        assert_eq!(extract_state(&envelope), None);
    }

    #[test]
    fn non_json_body_is_malformed_envelope() {
        let err = Envelope::from_slice(b"not json").unwrap_err();
        assert!(matches!(err, PayloadError::MalformedEnvelope(_)));
    }

    #[test]
    fn extract_state_reads_encoded_success() {
        let envelope = envelope_with_message(Value::String(record_json("SUCCEEDED").to_string()));
        assert_eq!(extract_state(&envelope), Some(PipelineState::Succeeded));
    }

    #[test]
    fn extract_state_reads_inline_failure() {
        let envelope = envelope_with_message(record_json("FAILED"));
        assert_eq!(extract_state(&envelope), Some(PipelineState::Failed));
    }

    #[test]
    fn extract_state_degrades_invalid_json_string_to_unknown() {
        let envelope = envelope_with_message(json!("{\"detail\": {\"state\": "));
        assert_eq!(extract_state(&envelope), Some(PipelineState::Unknown));
    }

    #[test]
    fn extract_state_degrades_empty_string_message_to_unknown() {
        let envelope = envelope_with_message(json!(""));
        assert_eq!(extract_state(&envelope), Some(PipelineState::Unknown));
    }

    #[test]
    fn extract_state_degrades_mistyped_field_to_unknown() {
        let mut record = record_json("SUCCEEDED");
        record["detail"]["version"] = json!("three");
        let envelope = envelope_with_message(record);

        assert_eq!(extract_state(&envelope), Some(PipelineState::Unknown));
    }

    #[test]
    fn record_without_state_yields_empty_state() {
        let envelope = envelope_with_message(json!({ "detail": { "pipeline": "p" } }));
        assert_eq!(
            extract_state(&envelope),
            Some(PipelineState::Other(String::new()))
        );
    }

    #[test]
    fn only_first_record_is_consulted() {
        let mut envelope = envelope_with_message(record_json("FAILED"));
        let mut second = envelope.records[0].clone();
        second.sns.message = record_json("SUCCEEDED");
        envelope.records.push(second);

        assert_eq!(extract_state(&envelope), Some(PipelineState::Failed));
    }
}
