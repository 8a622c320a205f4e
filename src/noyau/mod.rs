//! Noyau des réels paresseux
//!
//! Organisation interne :
//! - nombre.rs       : nombre exact (significande décimal + exposant + signe)
//! - intervalle.rs   : encadrement [borne_inf, borne_sup]
//! - lecture.rs      : lecture d'une chaîne décimale
//! - reel.rs         : feuilles, noeuds d'opération, enveloppe publique
//! - iterateur.rs    : curseur de précision (un cran = un chiffre)
//! - bornes.rs       : propagation des bornes par opérateur
//! - transcendant.rs : noyaux exp / log / sin-cos à arrondi dirigé
//! - erreurs.rs      : erreurs typées de l'évaluateur

pub mod erreurs;
pub mod intervalle;
pub mod iterateur;
pub mod lecture;
pub mod nombre;
pub mod reel;

pub(crate) mod bornes;
pub(crate) mod transcendant;


#[cfg(test)]
mod tests_proprietes;

// API publique minimale
pub use erreurs::Erreur;
pub use intervalle::Intervalle;
pub use iterateur::{IterateurPrecision, PRECISION_MAX_DEFAUT};
pub use nombre::NombreExact;
pub use reel::{Op, Reel};
