// src/noyau/iterateur.rs
//
// Curseur de précision : un par noeud, partagé via le DAG. Un cran de
// précision = un chiffre décimal de significande garanti sur les bornes.
// L'avancée d'un noeud d'opération n'avance un enfant que si la précision
// de l'enfant égale celle du noeud : un sous-arbre partagé déjà avancé par
// un autre parent n'est pas avancé deux fois (cliquet).

use std::rc::Rc;

use super::bornes;
use super::erreurs::Erreur;
use super::intervalle::Intervalle;
use super::nombre::NombreExact;
use super::reel::{Donnees, Noeud, Partage};

/// Plafond de précision par défaut d'un noeud. Les boucles d'affinage
/// (division, logarithme, famille tangente) échouent en le rencontrant
/// au lieu de boucler sans fin.
pub const PRECISION_MAX_DEFAUT: usize = 100;

pub(crate) struct Curseur {
    pub(crate) intervalle: Intervalle,
    pub(crate) precision: usize,
    pub(crate) precision_max: usize,
}

impl Curseur {
    pub(crate) fn frais() -> Self {
        Self {
            intervalle: Intervalle::ponctuel(NombreExact::zero()),
            precision: 0,
            precision_max: PRECISION_MAX_DEFAUT,
        }
    }
}

impl Donnees {
    /// Avance ce noeud d'un chiffre de précision.
    pub(crate) fn itere(&mut self) -> Result<(), Erreur> {
        let enfants = match &self.noeud {
            Noeud::Operation(o) => Some((Rc::clone(&o.gauche), o.droite.clone())),
            _ => None,
        };
        match enfants {
            Some((gauche, droite)) => {
                let p = self.curseur.precision;
                if gauche.borrow().curseur.precision == p {
                    gauche.borrow_mut().itere()?;
                }
                if let Some(d) = &droite {
                    if d.borrow().curseur.precision == p {
                        d.borrow_mut().itere()?;
                    }
                }
                self.curseur.precision += 1;
                bornes::maj_bornes_operation(self)
            }
            None => {
                self.curseur.precision += 1;
                maj_bornes_feuille(self);
                Ok(())
            }
        }
    }

    /// Avance ce noeud de `n` chiffres d'un coup : chaque enfant en retard
    /// est remonté à la précision cible, puis les bornes sont recalculées
    /// une seule fois.
    pub(crate) fn itere_n(&mut self, n: usize) -> Result<(), Erreur> {
        if n == 0 {
            return Ok(());
        }
        let enfants = match &self.noeud {
            Noeud::Operation(o) => Some((Rc::clone(&o.gauche), o.droite.clone())),
            _ => None,
        };
        match enfants {
            Some((gauche, droite)) => {
                let cible = self.curseur.precision + n;
                rattrape(&gauche, cible)?;
                if let Some(d) = &droite {
                    rattrape(d, cible)?;
                }
                self.curseur.precision = cible;
                bornes::maj_bornes_operation(self)
            }
            None => {
                self.curseur.precision += n;
                maj_bornes_feuille(self);
                Ok(())
            }
        }
    }
}

/// Remonte un enfant à la précision `cible` s'il est en retard.
pub(crate) fn rattrape(enfant: &Partage, cible: usize) -> Result<(), Erreur> {
    let p = enfant.borrow().curseur.precision;
    if p < cible {
        enfant.borrow_mut().itere_n(cible - p)?;
    }
    Ok(())
}

/// Encadrement d'une feuille à sa précision courante.
pub(crate) fn maj_bornes_feuille(donnees: &mut Donnees) {
    let p = donnees.curseur.precision;
    let intervalle = match &donnees.noeud {
        Noeud::Explicite(valeur) => Intervalle {
            borne_inf: valeur.tronque(p, false),
            borne_sup: valeur.tronque(p, true),
        },
        Noeud::Algorithme(feuille) => {
            // borne basse : les p premiers chiffres ; borne haute : un ulp de
            // plus à la dernière position, les chiffres futurs ne pouvant pas
            // dépasser ce plafond
            let chiffres: Vec<u8> = (1..=p).map(|n| (feuille.chiffre)(n)).collect();
            let grandeur_inf = NombreExact::nouveau(chiffres, feuille.exposant, true);
            let grandeur_sup = &grandeur_inf + &NombreExact::ulp(feuille.exposant, p);
            if feuille.positif {
                Intervalle {
                    borne_inf: grandeur_inf,
                    borne_sup: grandeur_sup,
                }
            } else {
                Intervalle {
                    borne_inf: -&grandeur_sup,
                    borne_sup: -&grandeur_inf,
                }
            }
        }
        Noeud::Rationnel(feuille) => Intervalle {
            borne_inf: NombreExact::depuis_rationnel(
                &feuille.numerateur,
                &feuille.denominateur,
                p,
                false,
            ),
            borne_sup: NombreExact::depuis_rationnel(
                &feuille.numerateur,
                &feuille.denominateur,
                p,
                true,
            ),
        },
        // les opérations passent par maj_bornes_operation
        Noeud::Operation(_) => return,
    };
    donnees.curseur.intervalle = intervalle;
}

/* ------------------------ Itérateur public ------------------------ */

/// Curseur public sur un réel. L'état de raffinement vit dans le noeud
/// partagé : deux itérateurs sur la même expression observent donc la même
/// progression, comme les opérandes partagés d'un DAG.
pub struct IterateurPrecision {
    donnees: Partage,
}

impl IterateurPrecision {
    pub(crate) fn nouveau(donnees: Partage) -> Result<Self, Erreur> {
        let frais = donnees.borrow().curseur.precision == 0;
        if frais {
            donnees.borrow_mut().itere()?;
        }
        Ok(Self { donnees })
    }

    /// Avance d'un chiffre de précision et retourne l'encadrement courant.
    /// Au plafond de précision, n'avance plus.
    pub fn avance(&mut self) -> Result<Intervalle, Erreur> {
        let (p, max) = self.etat();
        if p < max {
            self.donnees.borrow_mut().itere()?;
        }
        Ok(self.intervalle())
    }

    /// Avance de `n` chiffres (borné par le plafond) en un seul recalcul.
    pub fn avance_n(&mut self, n: usize) -> Result<Intervalle, Erreur> {
        let (p, max) = self.etat();
        let pas = n.min(max.saturating_sub(p));
        if pas > 0 {
            self.donnees.borrow_mut().itere_n(pas)?;
        }
        Ok(self.intervalle())
    }

    pub fn intervalle(&self) -> Intervalle {
        self.donnees.borrow().curseur.intervalle.clone()
    }

    pub fn precision(&self) -> usize {
        self.donnees.borrow().curseur.precision
    }

    pub fn precision_max(&self) -> usize {
        self.donnees.borrow().curseur.precision_max
    }

    fn etat(&self) -> (usize, usize) {
        let d = self.donnees.borrow();
        (d.curseur.precision, d.curseur.precision_max)
    }
}

impl Iterator for IterateurPrecision {
    type Item = Result<Intervalle, Erreur>;

    fn next(&mut self) -> Option<Self::Item> {
        let (p, max) = self.etat();
        if p >= max {
            return None;
        }
        Some(self.avance())
    }
}
