use crate::input::{InputError, parse_json};
use crate::model::aliquot::Aliquot;
use crate::plate::layout::PlateCreated;

pub fn parse_aliquots(text: &str) -> Result<Vec<Aliquot>, InputError> {
    parse_json(text, "aliquot list")
}

pub fn parse_plate_created(text: &str) -> Result<PlateCreated, InputError> {
    parse_json(text, "plate creation response")
}
