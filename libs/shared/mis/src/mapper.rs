//! Pure transformations from raw hub payloads to domain objects.
//!
//! Every function keeps source order and drops records that lack an id or a
//! name instead of producing half-empty domain objects.

use std::collections::HashSet;

use tracing::warn;

use crate::date_codec;
use crate::models::{AppointmentSlot, District, Doctor, Patient, SlotContext, Specialty};
use crate::wire::{
    normalize, AppointmentListPayload, DistrictListPayload, DoctorListPayload, MisError,
    PatientListPayload, SpecialityListPayload,
};

/// Joins the descriptions of a failure into one message.
pub fn aggregate_errors(errors: &[MisError]) -> String {
    errors
        .iter()
        .map(|e| e.description.trim())
        .filter(|d| !d.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

fn required(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn map_districts(payload: DistrictListPayload) -> Vec<District> {
    normalize(payload.list.and_then(|l| l.items))
        .into_iter()
        .filter_map(|raw| match (required(raw.id_district), required(raw.district_name)) {
            (Some(id), Some(name)) => Some(District { id, name }),
            (id, _) => {
                warn!(district_id = ?id, "Dropping MIS district without id or name");
                None
            }
        })
        .collect()
}

pub fn map_specialties(payload: SpecialityListPayload) -> Vec<Specialty> {
    let named: Vec<(String, String, String)> = normalize(payload.list.and_then(|l| l.items))
        .into_iter()
        .filter_map(|raw| match (required(raw.id_spesiality), required(raw.name_spesiality)) {
            (Some(id), Some(name)) => {
                let slug = slugify(&name);
                Some((id, name, slug))
            }
            (id, _) => {
                warn!(specialty_id = ?id, "Dropping MIS specialty without id or name");
                None
            }
        })
        .collect();

    // Suffixed slugs must never shadow a base slug that appears later in the list.
    let base_slugs: HashSet<String> = named.iter().map(|(_, _, slug)| slug.clone()).collect();
    let mut taken: HashSet<String> = HashSet::new();

    named
        .into_iter()
        .map(|(id, name, base)| {
            let slug = if taken.contains(&base) {
                unique_suffixed(&base, &id, &base_slugs, &taken)
            } else {
                base
            };
            taken.insert(slug.clone());
            Specialty { id, name, slug }
        })
        .collect()
}

fn unique_suffixed(
    base: &str,
    id: &str,
    base_slugs: &HashSet<String>,
    taken: &HashSet<String>,
) -> String {
    let first = format!("{}-{}", base, slugify(id));
    let is_free = |candidate: &String| !base_slugs.contains(candidate) && !taken.contains(candidate);

    if is_free(&first) {
        return first;
    }

    let mut counter = 2;
    loop {
        let candidate = format!("{}-{}", first, counter);
        if is_free(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

pub fn map_doctors(payload: DoctorListPayload, specialty_id: &str) -> Vec<Doctor> {
    normalize(payload.list.and_then(|l| l.items))
        .into_iter()
        .filter_map(|raw| match (required(raw.id_doc), required(raw.name)) {
            (Some(id), Some(full_name)) => Some(Doctor {
                id,
                full_name,
                specialty_id: specialty_id.to_string(),
            }),
            (id, _) => {
                warn!(doctor_id = ?id, specialty_id, "Dropping MIS doctor without id or name");
                None
            }
        })
        .collect()
}

pub fn map_patients(payload: PatientListPayload) -> Vec<Patient> {
    normalize(payload.list.and_then(|l| l.items))
        .into_iter()
        .filter_map(|raw| {
            match (required(raw.id_pat), required(raw.surname), required(raw.name)) {
                (Some(id), Some(last_name), Some(first_name)) => Some(Patient {
                    id,
                    last_name,
                    first_name,
                    middle_name: required(raw.second_name),
                    birth_date: raw.birthday.as_deref().map(date_codec::decode),
                }),
                (id, _, _) => {
                    warn!(patient_id = ?id, "Dropping MIS patient without id or name");
                    None
                }
            }
        })
        .collect()
}

pub fn map_slots(payload: AppointmentListPayload, context: &SlotContext) -> Vec<AppointmentSlot> {
    normalize(payload.list.and_then(|l| l.items))
        .into_iter()
        .filter_map(|raw| match (required(raw.id_appointment), raw.visit_start) {
            (Some(id), Some(visit_start)) => Some(AppointmentSlot {
                id,
                datetime: date_codec::decode(&visit_start),
                specialty: context.specialty.clone(),
                doctor_name: context.doctor_name.clone(),
                address: required(raw.address).unwrap_or_default(),
                cabinet: required(raw.room).unwrap_or_default(),
                ticket_number: required(raw.num).unwrap_or_default(),
            }),
            (id, _) => {
                warn!(slot_id = ?id, "Dropping MIS appointment without id or start time");
                None
            }
        })
        .collect()
}

/// Lowercase ASCII slug with Russian transliteration, e.g. "Терапевт" -> "terapevt".
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());

    for ch in name.chars().flat_map(char::to_lowercase) {
        let piece = match ch {
            'а' => "a", 'б' => "b", 'в' => "v", 'г' => "g", 'д' => "d",
            'е' | 'ё' | 'э' => "e", 'ж' => "zh", 'з' => "z", 'и' => "i",
            'й' | 'ы' => "y", 'к' => "k", 'л' => "l", 'м' => "m", 'н' => "n",
            'о' => "o", 'п' => "p", 'р' => "r", 'с' => "s", 'т' => "t",
            'у' => "u", 'ф' => "f", 'х' => "kh", 'ц' => "ts", 'ч' => "ch",
            'ш' => "sh", 'щ' => "shch", 'ъ' | 'ь' => "", 'ю' => "yu", 'я' => "ya",
            c if c.is_ascii_alphanumeric() => {
                slug.push(c);
                continue;
            }
            _ => "-",
        };

        if piece == "-" {
            if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
        } else {
            slug.push_str(piece);
        }
    }

    let slug = slug.trim_matches('-').to_string();
    if slug.is_empty() {
        "specialty".to_string()
    } else {
        slug
    }
}
