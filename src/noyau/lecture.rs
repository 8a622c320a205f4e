// src/noyau/lecture.rs
//
// Lecture d'une chaîne décimale vers un nombre exact.
// Grammaire : ±chiffres[.chiffres][(e|E)±chiffres]
// Les zéros de tête de la partie entière et de queue de la partie décimale
// sont retirés avant la pose de l'exposant ; le zéro reste canonique.

use super::erreurs::Erreur;
use super::nombre::NombreExact;

pub fn lit_decimal(texte: &str) -> Result<NombreExact, Erreur> {
    let s = texte.trim();
    let octets = s.as_bytes();
    let mut i = 0;

    let mut positif = true;
    if i < octets.len() && (octets[i] == b'+' || octets[i] == b'-') {
        positif = octets[i] == b'+';
        i += 1;
    }

    let debut_ent = i;
    while i < octets.len() && octets[i].is_ascii_digit() {
        i += 1;
    }
    let partie_entiere = &s[debut_ent..i];

    let mut partie_decimale = "";
    if i < octets.len() && octets[i] == b'.' {
        i += 1;
        let debut_dec = i;
        while i < octets.len() && octets[i].is_ascii_digit() {
            i += 1;
        }
        partie_decimale = &s[debut_dec..i];
    }

    let mut exposant_supplementaire: i64 = 0;
    if i < octets.len() && (octets[i] == b'e' || octets[i] == b'E') {
        i += 1;
        let debut_exp = i;
        if i < octets.len() && (octets[i] == b'+' || octets[i] == b'-') {
            i += 1;
        }
        while i < octets.len() && octets[i].is_ascii_digit() {
            i += 1;
        }
        exposant_supplementaire = s[debut_exp..i]
            .parse::<i64>()
            .map_err(|_| Erreur::ChaineInvalide)?;
    }

    if i != octets.len() || (partie_entiere.is_empty() && partie_decimale.is_empty()) {
        return Err(Erreur::ChaineInvalide);
    }

    // zéros de tête de la partie entière : l'exposant se calcule après
    let entiere = partie_entiere.trim_start_matches('0');
    let mut exposant = entiere.len() as i64 + exposant_supplementaire;

    // zéros de queue de la partie décimale
    let mut decimale = partie_decimale.trim_end_matches('0');

    // nombre < 1 : les zéros de tête de la décimale glissent dans l'exposant
    if entiere.is_empty() {
        let avant = decimale.len();
        decimale = decimale.trim_start_matches('0');
        exposant -= (avant - decimale.len()) as i64;
    }

    if entiere.is_empty() && decimale.is_empty() {
        return Ok(NombreExact::zero());
    }

    let mut chiffres: Vec<u8> = Vec::with_capacity(entiere.len() + decimale.len());
    chiffres.extend(entiere.bytes().map(|b| b - b'0'));
    chiffres.extend(decimale.bytes().map(|b| b - b'0'));

    Ok(NombreExact::nouveau(chiffres, exposant, positif))
}
