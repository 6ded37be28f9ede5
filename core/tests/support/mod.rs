//! Play-by-play fixtures shared by the integration tests.
#![allow(dead_code)]

use boxscore_core::feed::GameFeed;
use serde_json::{json, Value};

pub const GAME: i64 = 746_001;

/// Builds one `allPlays` entry in the provider's JSON shape.
pub struct PlayBuilder {
    value: Value,
}

impl PlayBuilder {
    /// Completed at-bat, right-handed batter vs right-handed pitcher.
    pub fn at_bat(batter: i64, pitcher: i64) -> Self {
        Self {
            value: json!({
                "result": { "type": "atBat", "eventType": "", "event": "", "isOut": false, "rbi": 0 },
                "about": { "isComplete": true },
                "matchup": {
                    "batter": { "id": batter },
                    "pitcher": { "id": pitcher },
                    "batSide": { "code": "R" },
                    "pitchHand": { "code": "R" },
                    "splits": { "menOnBase": "Empty" }
                },
                "runners": [],
                "playEvents": []
            }),
        }
    }

    pub fn bats(mut self, code: &str) -> Self {
        self.value["matchup"]["batSide"]["code"] = json!(code);
        self
    }

    pub fn throws(mut self, code: &str) -> Self {
        self.value["matchup"]["pitchHand"]["code"] = json!(code);
        self
    }

    pub fn event(mut self, event_type: &str, label: &str) -> Self {
        self.value["result"]["eventType"] = json!(event_type);
        self.value["result"]["event"] = json!(label);
        self
    }

    pub fn result_type(mut self, result_type: &str) -> Self {
        self.value["result"]["type"] = json!(result_type);
        self
    }

    pub fn out(mut self) -> Self {
        self.value["result"]["isOut"] = json!(true);
        self
    }

    pub fn rbi(mut self, rbi: i64) -> Self {
        self.value["result"]["rbi"] = json!(rbi);
        self
    }

    pub fn incomplete(mut self) -> Self {
        self.value["about"]["isComplete"] = json!(false);
        self
    }

    pub fn men_on(mut self, label: &str) -> Self {
        self.value["matchup"]["splits"]["menOnBase"] = json!(label);
        self
    }

    pub fn without_batter(mut self) -> Self {
        self.value["matchup"]["batter"] = json!({});
        self
    }

    pub fn without_pitcher(mut self) -> Self {
        self.value["matchup"]["pitcher"] = json!({});
        self
    }

    pub fn runner(mut self, runner: Value) -> Self {
        if let Some(list) = self.value["runners"].as_array_mut() {
            list.push(runner);
        }
        self
    }

    /// Append pitches: `balls` balls, then `strikes` non-ball pitches.
    pub fn pitches(mut self, balls: usize, strikes: usize) -> Self {
        if let Some(list) = self.value["playEvents"].as_array_mut() {
            for _ in 0..balls {
                list.push(json!({ "isPitch": true, "type": "pitch", "details": { "isBall": true } }));
            }
            for _ in 0..strikes {
                list.push(json!({ "isPitch": true, "type": "pitch", "details": { "isBall": false } }));
            }
        }
        self
    }

    pub fn play_event(mut self, event: Value) -> Self {
        if let Some(list) = self.value["playEvents"].as_array_mut() {
            list.push(event);
        }
        self
    }

    pub fn build(self) -> Value {
        self.value
    }
}

/// A runner movement that neither scores nor is put out.
pub fn moves(runner: i64, start: Option<&str>, end: Option<&str>) -> Value {
    json!({
        "movement": { "start": start, "end": end, "isOut": false },
        "details": { "eventType": "", "runner": { "id": runner }, "isScoringEvent": false }
    })
}

pub fn put_out(runner: i64, start: Option<&str>) -> Value {
    json!({
        "movement": { "start": start, "end": null, "isOut": true },
        "details": { "eventType": "", "runner": { "id": runner }, "isScoringEvent": false }
    })
}

pub fn scores(runner: i64, start: Option<&str>, responsible: Option<i64>, earned: bool) -> Value {
    let responsible = match responsible {
        Some(id) => json!({ "id": id }),
        None => json!(null),
    };
    json!({
        "movement": { "start": start, "end": "score", "isOut": false },
        "details": {
            "eventType": "",
            "runner": { "id": runner },
            "isScoringEvent": true,
            "earned": earned,
            "responsiblePitcher": responsible
        }
    })
}

/// A runner movement tagged with a base-running event code.
pub fn running_event(runner: i64, start: &str, end: Option<&str>, event_type: &str) -> Value {
    json!({
        "movement": { "start": start, "end": end, "isOut": end.is_none() },
        "details": { "eventType": event_type, "runner": { "id": runner }, "isScoringEvent": false }
    })
}

pub fn feed(plays: Vec<Value>) -> GameFeed {
    let _ = env_logger::builder().is_test(true).try_init();
    GameFeed::from_value(json!({ "allPlays": plays })).expect("fixture feed decodes")
}
