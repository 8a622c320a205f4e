// src/noyau/erreurs.rs
//
// Erreurs typées de l'évaluateur. Chaque échec remonte par l'itérateur qui
// l'a détecté ; l'état d'intervalle déjà validé des autres branches reste
// utilisable, et on peut relever la précision maximale puis réessayer.

use thiserror::Error;

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum Erreur {
    #[error("chaîne décimale invalide")]
    ChaineInvalide,

    #[error("division divergente : le diviseur encadre zéro à la précision maximale")]
    DivisionDivergente,

    #[error("puissance entière : exposant à partie fractionnaire non nulle")]
    ExposantNonEntier,

    #[error("puissance entière : exposant négatif non supporté")]
    ExposantNegatif,

    #[error("logarithme d'un nombre non strictement positif")]
    LogarithmeHorsDomaine,

    #[error("précision maximale atteinte près d'un pôle trigonométrique")]
    PrecisionMaxTrigonometrique,

    #[error("opération inconnue dans l'évaluateur")]
    OperationInconnue,
}
