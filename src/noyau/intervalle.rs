// src/noyau/intervalle.rs
//
// Encadrement [borne_inf, borne_sup] d'une valeur réelle, avec l'invariant
// borne_inf <= borne_sup. Si l'intervalle n'est ni positif ni négatif, il
// encadre zéro (ou le touche à une extrémité).

use std::fmt;

use super::nombre::NombreExact;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Intervalle {
    pub borne_inf: NombreExact,
    pub borne_sup: NombreExact,
}

impl Intervalle {
    pub(crate) fn ponctuel(valeur: NombreExact) -> Self {
        Self {
            borne_inf: valeur.clone(),
            borne_sup: valeur,
        }
    }

    /// Construit l'encadrement des deux valeurs, dans l'ordre.
    pub(crate) fn ordonne(a: NombreExact, b: NombreExact) -> Self {
        if a <= b {
            Self {
                borne_inf: a,
                borne_sup: b,
            }
        } else {
            Self {
                borne_inf: b,
                borne_sup: a,
            }
        }
    }

    pub fn positif(&self) -> bool {
        self.borne_inf.strictement_positif()
    }

    pub fn negatif(&self) -> bool {
        self.borne_sup.strictement_negatif()
    }

    pub fn encadre_zero(&self) -> bool {
        !self.positif() && !self.negatif()
    }

    pub fn largeur(&self) -> NombreExact {
        &self.borne_sup - &self.borne_inf
    }

    /// Vrai si la valeur est dans l'encadrement, bornes comprises.
    pub fn contient(&self, valeur: &NombreExact) -> bool {
        self.borne_inf <= *valeur && *valeur <= self.borne_sup
    }
}

impl fmt::Display for Intervalle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.borne_inf, self.borne_sup)
    }
}
