// src/lib.rs
//
// Réels paresseux — arithmétique réelle exacte par raffinement d'intervalles
// ---------------------------------------------------------------------------
// Un réel est représenté par un arbre d'expression (feuilles explicites,
// algorithmiques ou rationnelles, noeuds d'opération partagés) qui produit à
// la demande des encadrements rationnels arbitrairement serrés de sa valeur.
// Chaque cran de l'itérateur de précision gagne un chiffre décimal : les
// bornes basses sont arrondies vers −∞, les hautes vers +∞, si bien que la
// valeur exacte reste toujours dans l'encadrement.
//
//   use reels_paresseux::Reel;
//
//   let a = Reel::depuis_chaine("1.9")?;
//   let b = Reel::depuis_chaine("1.9")?;
//   let produit = &a * &b;
//   let mut it = produit.iterateur()?;
//   it.avance()?; // [3.61, 3.61]
//
// Aucune égalité sur les réels (indécidable), aucun repli flottant : tout
// passe par les encadrements.

pub mod noyau;

pub use noyau::{Erreur, Intervalle, IterateurPrecision, NombreExact, Op, Reel};
