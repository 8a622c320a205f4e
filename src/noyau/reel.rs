// src/noyau/reel.rs
//
// Représentation des réels : feuilles (explicite, algorithme, rationnel) et
// noeuds d'opération. Les opérandes sont partagés par comptage de références,
// donc un même sous-arbre peut apparaître dans plusieurs expressions (DAG).
// La structure est immuable après construction ; seul l'état du curseur de
// précision bouge, et la construction ne déclenche aucun calcul d'opération.

use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use std::cell::RefCell;
use std::ops::{Add, Div, Mul, Sub};
use std::rc::Rc;
use std::str::FromStr;

use super::erreurs::Erreur;
use super::intervalle::Intervalle;
use super::iterateur::{Curseur, IterateurPrecision};
use super::lecture::lit_decimal;
use super::nombre::NombreExact;

/// Producteur de chiffres d'une feuille algorithmique : `f(n)` est le n-ième
/// chiffre (base 10, 1-indexé) du développement décimal de la grandeur.
pub(crate) type FonctionChiffre = Rc<dyn Fn(usize) -> u8>;

pub(crate) struct FeuilleAlgorithme {
    pub(crate) chiffre: FonctionChiffre,
    pub(crate) exposant: i64,
    pub(crate) positif: bool,
}

/// Rationnel p/q avec q > 0, le signe porté par le numérateur.
pub(crate) struct FeuilleRationnelle {
    pub(crate) numerateur: BigInt,
    pub(crate) denominateur: BigInt,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Addition,
    Soustraction,
    Multiplication,
    Division,
    PuissanceEntiere,
    Exponentielle,
    Logarithme,
    Sinus,
    Cosinus,
    Tangente,
    Cotangente,
    Secante,
    Cosecante,
}

pub(crate) struct Operation {
    pub(crate) op: Op,
    pub(crate) gauche: Partage,
    pub(crate) droite: Option<Partage>,
}

pub(crate) enum Noeud {
    Explicite(NombreExact),
    Algorithme(FeuilleAlgorithme),
    Rationnel(FeuilleRationnelle),
    Operation(Operation),
}

/// Un réel et son curseur de précision, partagés par le DAG.
pub(crate) struct Donnees {
    pub(crate) noeud: Noeud,
    pub(crate) curseur: Curseur,
}

pub(crate) type Partage = Rc<RefCell<Donnees>>;

impl Donnees {
    /// Les feuilles naissent directement à la précision 1.
    pub(crate) fn feuille(noeud: Noeud) -> Partage {
        let mut donnees = Donnees {
            noeud,
            curseur: Curseur::frais(),
        };
        donnees.curseur.precision = 1;
        super::iterateur::maj_bornes_feuille(&mut donnees);
        Rc::new(RefCell::new(donnees))
    }

    /// Les opérations naissent fraîches ; leur premier intervalle est calculé
    /// au premier passage de l'itérateur.
    pub(crate) fn operation(op: Op, gauche: Partage, droite: Option<Partage>) -> Partage {
        Rc::new(RefCell::new(Donnees {
            noeud: Noeud::Operation(Operation { op, gauche, droite }),
            curseur: Curseur::frais(),
        }))
    }
}

/* ------------------------ Enveloppe publique ------------------------ */

/// Un nombre réel évaluable par raffinement d'intervalles. Le clonage est
/// superficiel : les deux clones partagent le même noeud et donc le même
/// état de raffinement.
#[derive(Clone)]
pub struct Reel {
    donnees: Partage,
}

impl Reel {
    /// Lit une chaîne décimale `±chiffres[.chiffres][(e|E)±chiffres]`.
    pub fn depuis_chaine(texte: &str) -> Result<Self, Erreur> {
        Ok(Self {
            donnees: Donnees::feuille(Noeud::Explicite(lit_decimal(texte)?)),
        })
    }

    /// Construit une feuille explicite depuis un vecteur de chiffres base 10.
    pub fn depuis_chiffres(chiffres: Vec<u8>, exposant: i64, positif: bool) -> Result<Self, Erreur> {
        if chiffres.is_empty() || chiffres.iter().any(|&c| c > 9) {
            return Err(Erreur::ChaineInvalide);
        }
        Ok(Self {
            donnees: Donnees::feuille(Noeud::Explicite(NombreExact::nouveau(
                chiffres, exposant, positif,
            ))),
        })
    }

    /// Construit une feuille rationnelle p/q, q non nul.
    pub fn rationnel(numerateur: impl Into<BigInt>, denominateur: impl Into<BigInt>) -> Result<Self, Erreur> {
        let mut num = numerateur.into();
        let mut den = denominateur.into();
        if den.is_zero() {
            return Err(Erreur::DivisionDivergente);
        }
        if den.is_negative() {
            num = -num;
            den = -den;
        }
        Ok(Self {
            donnees: Donnees::feuille(Noeud::Rationnel(FeuilleRationnelle {
                numerateur: num,
                denominateur: den,
            })),
        })
    }

    /// Construit une feuille algorithmique : `chiffre(n)` doit renvoyer le
    /// n-ième chiffre (0..=9) du développement de la grandeur.
    pub fn algorithme(chiffre: impl Fn(usize) -> u8 + 'static, exposant: i64, positif: bool) -> Self {
        Self {
            donnees: Donnees::feuille(Noeud::Algorithme(FeuilleAlgorithme {
                chiffre: Rc::new(chiffre),
                exposant,
                positif,
            })),
        }
    }

    fn operation(op: Op, gauche: &Reel, droite: Option<&Reel>) -> Reel {
        Reel {
            donnees: Donnees::operation(
                op,
                Rc::clone(&gauche.donnees),
                droite.map(|d| Rc::clone(&d.donnees)),
            ),
        }
    }

    /// Puissance entière : l'exposant doit se résoudre en entier positif ou nul.
    pub fn puissance(&self, exposant: &Reel) -> Reel {
        Self::operation(Op::PuissanceEntiere, self, Some(exposant))
    }

    pub fn exp(&self) -> Reel {
        Self::operation(Op::Exponentielle, self, None)
    }

    pub fn log(&self) -> Reel {
        Self::operation(Op::Logarithme, self, None)
    }

    pub fn sin(&self) -> Reel {
        Self::operation(Op::Sinus, self, None)
    }

    pub fn cos(&self) -> Reel {
        Self::operation(Op::Cosinus, self, None)
    }

    pub fn tan(&self) -> Reel {
        Self::operation(Op::Tangente, self, None)
    }

    pub fn cot(&self) -> Reel {
        Self::operation(Op::Cotangente, self, None)
    }

    pub fn sec(&self) -> Reel {
        Self::operation(Op::Secante, self, None)
    }

    pub fn csc(&self) -> Reel {
        Self::operation(Op::Cosecante, self, None)
    }

    /// Itérateur de précision sur ce réel. Le premier passage amène le noeud
    /// à la précision 1, ce qui peut déjà échouer (division divergente, etc.).
    pub fn iterateur(&self) -> Result<IterateurPrecision, Erreur> {
        IterateurPrecision::nouveau(Rc::clone(&self.donnees))
    }

    /// Plafond de précision de ce noeud, consulté par les boucles d'affinage.
    pub fn fixe_precision_max(&self, precision_max: usize) {
        self.donnees.borrow_mut().curseur.precision_max = precision_max;
    }

    /// Raffine jusqu'à la précision demandée (bornée par le plafond) et
    /// retourne l'encadrement courant.
    pub fn approximation(&self, precision: usize) -> Result<Intervalle, Erreur> {
        let mut it = self.iterateur()?;
        while it.precision() < precision && it.precision() < it.precision_max() {
            it.avance()?;
        }
        Ok(it.intervalle())
    }
}

impl FromStr for Reel {
    type Err = Erreur;
    fn from_str(texte: &str) -> Result<Self, Erreur> {
        Self::depuis_chaine(texte)
    }
}

/* ------------------------ Opérateurs ------------------------ */

impl Add for &Reel {
    type Output = Reel;
    fn add(self, autre: Self) -> Reel {
        Reel::operation(Op::Addition, self, Some(autre))
    }
}

impl Sub for &Reel {
    type Output = Reel;
    fn sub(self, autre: Self) -> Reel {
        Reel::operation(Op::Soustraction, self, Some(autre))
    }
}

impl Mul for &Reel {
    type Output = Reel;
    fn mul(self, autre: Self) -> Reel {
        Reel::operation(Op::Multiplication, self, Some(autre))
    }
}

impl Div for &Reel {
    type Output = Reel;
    fn div(self, autre: Self) -> Reel {
        Reel::operation(Op::Division, self, Some(autre))
    }
}

impl Add for Reel {
    type Output = Reel;
    fn add(self, autre: Reel) -> Reel {
        &self + &autre
    }
}

impl Sub for Reel {
    type Output = Reel;
    fn sub(self, autre: Reel) -> Reel {
        &self - &autre
    }
}

impl Mul for Reel {
    type Output = Reel;
    fn mul(self, autre: Reel) -> Reel {
        &self * &autre
    }
}

impl Div for Reel {
    type Output = Reel;
    fn div(self, autre: Reel) -> Reel {
        &self / &autre
    }
}
