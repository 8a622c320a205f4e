// src/noyau/bornes.rs
//
// Propagation des bornes par opérateur : à partir des encadrements des
// opérandes (déjà avancés), recalcule l'encadrement du noeud à sa précision
// courante. Chaque écriture de borne passe par un arrondi dirigé : borne
// basse vers −∞, borne haute vers +∞, de sorte que l'encadrement contienne
// toujours la valeur mathématique.
//
// Les cas qui exigent d'écarter zéro (division, logarithme, famille
// tangente) affinent les opérandes dans une boucle bornée par le plafond de
// précision du noeud, puis échouent avec l'erreur dédiée.

use log::trace;
use std::rc::Rc;

use super::erreurs::Erreur;
use super::intervalle::Intervalle;
use super::iterateur::rattrape;
use super::nombre::NombreExact;
use super::reel::{Donnees, Noeud, Op, Partage};
use super::transcendant::{exp_tronque, log_tronque, sin_cos};

pub(crate) fn maj_bornes_operation(donnees: &mut Donnees) -> Result<(), Erreur> {
    let (op, gauche, droite) = match &donnees.noeud {
        Noeud::Operation(o) => (o.op, Rc::clone(&o.gauche), o.droite.clone()),
        _ => return Err(Erreur::OperationInconnue),
    };
    match op {
        Op::Addition => addition(donnees, &gauche, &binaire(droite)?),
        Op::Soustraction => soustraction(donnees, &gauche, &binaire(droite)?),
        Op::Multiplication => multiplication(donnees, &gauche, &binaire(droite)?),
        Op::Division => division(donnees, &gauche, &binaire(droite)?),
        Op::PuissanceEntiere => puissance_entiere(donnees, &gauche, &binaire(droite)?),
        Op::Exponentielle => exponentielle(donnees, &gauche),
        Op::Logarithme => logarithme(donnees, &gauche),
        Op::Sinus => sinus(donnees, &gauche),
        Op::Cosinus => cosinus(donnees, &gauche),
        Op::Tangente => tangente(donnees, &gauche),
        Op::Cotangente => cotangente(donnees, &gauche),
        Op::Secante => secante(donnees, &gauche),
        Op::Cosecante => cosecante(donnees, &gauche),
    }
}

fn binaire(droite: Option<Partage>) -> Result<Partage, Erreur> {
    droite.ok_or(Erreur::OperationInconnue)
}

fn intervalle_de(noeud: &Partage) -> Intervalle {
    noeud.borrow().curseur.intervalle.clone()
}

/* ------------------------ Addition, soustraction ------------------------ */

fn addition(donnees: &mut Donnees, gauche: &Partage, droite: &Partage) -> Result<(), Erreur> {
    let p = donnees.curseur.precision;
    let g = intervalle_de(gauche);
    let d = intervalle_de(droite);
    donnees.curseur.intervalle = Intervalle {
        borne_inf: &g.borne_inf.tronque(p, false) + &d.borne_inf.tronque(p, false),
        borne_sup: &g.borne_sup.tronque(p, true) + &d.borne_sup.tronque(p, true),
    };
    Ok(())
}

fn soustraction(donnees: &mut Donnees, gauche: &Partage, droite: &Partage) -> Result<(), Erreur> {
    let p = donnees.curseur.precision;
    let g = intervalle_de(gauche);
    let d = intervalle_de(droite);
    donnees.curseur.intervalle = Intervalle {
        borne_inf: &g.borne_inf.tronque(p, false) - &d.borne_sup.tronque(p, true),
        borne_sup: &g.borne_sup.tronque(p, true) - &d.borne_inf.tronque(p, false),
    };
    Ok(())
}

/* ------------------------ Multiplication ------------------------ */

fn multiplication(donnees: &mut Donnees, gauche: &Partage, droite: &Partage) -> Result<(), Erreur> {
    let p = donnees.curseur.precision;
    let g = intervalle_de(gauche);
    let d = intervalle_de(droite);

    let g_inf = g.borne_inf.tronque(p, false);
    let g_sup = g.borne_sup.tronque(p, true);
    let d_inf = d.borne_inf.tronque(p, false);
    let d_sup = d.borne_sup.tronque(p, true);

    donnees.curseur.intervalle = if g.positif() && d.positif() {
        Intervalle {
            borne_inf: &g_inf * &d_inf,
            borne_sup: &g_sup * &d_sup,
        }
    } else if g.negatif() && d.negatif() {
        Intervalle {
            borne_inf: &g_sup * &d_sup,
            borne_sup: &g_inf * &d_inf,
        }
    } else if g.negatif() && d.positif() {
        Intervalle {
            borne_inf: &g_inf * &d_sup,
            borne_sup: &g_sup * &d_inf,
        }
    } else if g.positif() && d.negatif() {
        Intervalle {
            borne_inf: &g_sup * &d_inf,
            borne_sup: &g_inf * &d_sup,
        }
    } else {
        // au moins un opérande encadre zéro : min/max des quatre coins
        let coins = [&g_inf * &d_inf, &g_sup * &d_sup, &g_inf * &d_sup, &g_sup * &d_inf];
        let mut inf = coins[0].clone();
        let mut sup = coins[0].clone();
        for coin in &coins[1..] {
            if *coin < inf {
                inf = coin.clone();
            }
            if *coin > sup {
                sup = coin.clone();
            }
        }
        Intervalle {
            borne_inf: inf,
            borne_sup: sup,
        }
    };
    Ok(())
}

/* ------------------------ Division ------------------------ */

fn division(donnees: &mut Donnees, gauche: &Partage, droite: &Partage) -> Result<(), Erreur> {
    // le diviseur doit exclure zéro, bornes comprises
    loop {
        let d = intervalle_de(droite);
        if d.positif() || d.negatif() {
            break;
        }
        if donnees.curseur.precision >= donnees.curseur.precision_max {
            return Err(Erreur::DivisionDivergente);
        }
        let cible = donnees.curseur.precision + 1;
        trace!("division : le diviseur encadre zéro, affinage vers {cible}");
        rattrape(gauche, cible)?;
        rattrape(droite, cible)?;
        donnees.curseur.precision = cible;
    }
    let p = donnees.curseur.precision;
    donnees.curseur.intervalle =
        divise_intervalles(&intervalle_de(gauche), &intervalle_de(droite), p)?;
    Ok(())
}

/// Division d'encadrements : sélection des coins par cas de signe, quotients
/// dirigés. Le dénominateur doit être de signe constant.
fn divise_intervalles(
    numerateur: &Intervalle,
    denominateur: &Intervalle,
    p: usize,
) -> Result<Intervalle, Erreur> {
    let n_pos = numerateur.positif();
    let n_neg = numerateur.negatif();
    let d_pos = denominateur.positif();
    let d_neg = denominateur.negatif();
    if !d_pos && !d_neg {
        return Err(Erreur::DivisionDivergente);
    }

    let (num_sup, den_sup) = if n_pos {
        if d_pos {
            (&numerateur.borne_sup, &denominateur.borne_inf)
        } else {
            (&numerateur.borne_inf, &denominateur.borne_inf)
        }
    } else if n_neg {
        if d_pos {
            (&numerateur.borne_sup, &denominateur.borne_sup)
        } else {
            (&numerateur.borne_inf, &denominateur.borne_sup)
        }
    } else if d_pos {
        (&numerateur.borne_sup, &denominateur.borne_inf)
    } else {
        (&numerateur.borne_inf, &denominateur.borne_sup)
    };

    let (num_inf, den_inf) = if n_pos {
        if d_pos {
            (&numerateur.borne_inf, &denominateur.borne_sup)
        } else {
            (&numerateur.borne_sup, &denominateur.borne_sup)
        }
    } else if n_neg {
        if d_pos {
            (&numerateur.borne_inf, &denominateur.borne_inf)
        } else {
            (&numerateur.borne_sup, &denominateur.borne_inf)
        }
    } else if d_pos {
        (&numerateur.borne_inf, &denominateur.borne_inf)
    } else {
        (&numerateur.borne_sup, &denominateur.borne_sup)
    };

    Ok(Intervalle {
        borne_inf: num_inf.divise(den_inf, p, false)?,
        borne_sup: num_sup.divise(den_sup, p, true)?,
    })
}

/* ------------------------ Puissance entière ------------------------ */

fn puissance_entiere(donnees: &mut Donnees, gauche: &Partage, droite: &Partage) -> Result<(), Erreur> {
    // l'exposant est poussé à son plafond de précision pour être lu en entier
    {
        let (p, max) = {
            let d = droite.borrow();
            (d.curseur.precision, d.curseur.precision_max)
        };
        if p < max {
            droite.borrow_mut().itere_n(max - p)?;
        }
    }
    let e = intervalle_de(droite);
    if e.borne_inf != e.borne_sup || !e.borne_sup.est_entier() {
        return Err(Erreur::ExposantNonEntier);
    }
    if e.borne_sup.strictement_negatif() {
        return Err(Erreur::ExposantNegatif);
    }
    let exposant = e
        .borne_sup
        .vers_entier_positif()
        .ok_or(Erreur::ExposantNonEntier)?;
    let pair = !exposant.bit(0);

    let g = intervalle_de(gauche);
    donnees.curseur.intervalle = if g.positif() {
        Intervalle {
            borne_inf: g.borne_inf.puissance_entiere(&exposant),
            borne_sup: g.borne_sup.puissance_entiere(&exposant),
        }
    } else if g.negatif() {
        if pair {
            Intervalle {
                borne_inf: g.borne_sup.puissance_entiere(&exposant),
                borne_sup: g.borne_inf.puissance_entiere(&exposant),
            }
        } else {
            Intervalle {
                borne_inf: g.borne_inf.puissance_entiere(&exposant),
                borne_sup: g.borne_sup.puissance_entiere(&exposant),
            }
        }
    } else if pair {
        // la base encadre zéro : le minimum d'une puissance paire est 0
        let dominant = if g.borne_sup.abs() > g.borne_inf.abs() {
            &g.borne_sup
        } else {
            &g.borne_inf
        };
        Intervalle {
            borne_inf: NombreExact::zero(),
            borne_sup: dominant.puissance_entiere(&exposant),
        }
    } else {
        Intervalle {
            borne_inf: g.borne_inf.puissance_entiere(&exposant),
            borne_sup: g.borne_sup.puissance_entiere(&exposant),
        }
    };
    Ok(())
}

/* ------------------------ Exponentielle, logarithme ------------------------ */

fn exponentielle(donnees: &mut Donnees, gauche: &Partage) -> Result<(), Erreur> {
    let p = donnees.curseur.precision;
    let g = intervalle_de(gauche);
    donnees.curseur.intervalle = Intervalle {
        borne_inf: exp_tronque(&g.borne_inf.tronque(p, false), p, false),
        borne_sup: exp_tronque(&g.borne_sup.tronque(p, true), p, true),
    };
    Ok(())
}

fn logarithme(donnees: &mut Donnees, gauche: &Partage) -> Result<(), Erreur> {
    // borne haute <= 0 : tout l'encadrement est hors domaine
    if !intervalle_de(gauche).borne_sup.strictement_positif() {
        return Err(Erreur::LogarithmeHorsDomaine);
    }
    // borne basse <= 0 : on affine l'opérande jusqu'à la positivité stricte
    loop {
        if intervalle_de(gauche).borne_inf.strictement_positif() {
            break;
        }
        if donnees.curseur.precision >= donnees.curseur.precision_max {
            return Err(Erreur::LogarithmeHorsDomaine);
        }
        let cible = donnees.curseur.precision + 1;
        trace!("logarithme : borne basse non positive, affinage vers {cible}");
        rattrape(gauche, cible)?;
        donnees.curseur.precision = cible;
    }
    let p = donnees.curseur.precision;
    let g = intervalle_de(gauche);
    donnees.curseur.intervalle = Intervalle {
        borne_inf: log_tronque(&g.borne_inf.tronque(p, false), p, false)?,
        borne_sup: log_tronque(&g.borne_sup.tronque(p, true), p, true)?,
    };
    Ok(())
}

/* ------------------------ Sinus, cosinus ------------------------ */

fn sinus(donnees: &mut Donnees, gauche: &Partage) -> Result<(), Erreur> {
    let p = donnees.curseur.precision;
    let g = intervalle_de(gauche);
    let (sin_inf, cos_inf) = sin_cos(&g.borne_inf.tronque(p, false), p, false);
    let (sin_sup, cos_sup) = sin_cos(&g.borne_sup.tronque(p, true), p, true);

    // signe de la dérivée constant aux extrémités : sinus monotone
    donnees.curseur.intervalle = if cos_inf.signe_positif() == cos_sup.signe_positif() {
        Intervalle::ordonne(sin_inf, sin_sup)
    } else if !sin_sup.signe_positif() {
        // extremum intérieur côté négatif : le minimum vaut −1
        let borne_sup = if sin_inf > sin_sup { sin_inf } else { sin_sup };
        Intervalle {
            borne_inf: NombreExact::moins_un(),
            borne_sup,
        }
    } else {
        let borne_inf = if sin_sup < sin_inf { sin_sup } else { sin_inf };
        Intervalle {
            borne_inf,
            borne_sup: NombreExact::un(),
        }
    };
    Ok(())
}

fn cosinus(donnees: &mut Donnees, gauche: &Partage) -> Result<(), Erreur> {
    let p = donnees.curseur.precision;
    let g = intervalle_de(gauche);
    let (sin_inf, cos_inf) = sin_cos(&g.borne_inf.tronque(p, false), p, false);
    let (sin_sup, cos_sup) = sin_cos(&g.borne_sup.tronque(p, true), p, true);

    donnees.curseur.intervalle = if sin_inf.signe_positif() == sin_sup.signe_positif() {
        Intervalle::ordonne(cos_inf, cos_sup)
    } else if !cos_sup.signe_positif() {
        let borne_sup = if cos_inf > cos_sup { cos_inf } else { cos_sup };
        Intervalle {
            borne_inf: NombreExact::moins_un(),
            borne_sup,
        }
    } else {
        let borne_inf = if cos_sup < cos_inf { cos_sup } else { cos_inf };
        Intervalle {
            borne_inf,
            borne_sup: NombreExact::un(),
        }
    };
    Ok(())
}

/* ------------------------ Famille tangente ------------------------ */

/// Affine l'opérande jusqu'à ce que le dénominateur trigonométrique (cos si
/// `sur_cosinus`, sin sinon) soit de signe constant et non nul aux deux
/// extrémités, ou échoue au plafond de précision. Retourne les quatre
/// valeurs (sin, cos) dirigées aux extrémités.
fn separe_du_pole(
    donnees: &mut Donnees,
    gauche: &Partage,
    sur_cosinus: bool,
) -> Result<(NombreExact, NombreExact, NombreExact, NombreExact), Erreur> {
    loop {
        let p = donnees.curseur.precision;
        let g = intervalle_de(gauche);
        let (sin_inf, cos_inf) = sin_cos(&g.borne_inf.tronque(p, false), p, false);
        let (sin_sup, cos_sup) = sin_cos(&g.borne_sup.tronque(p, true), p, true);

        let (denom_inf, denom_sup) = if sur_cosinus {
            (&cos_inf, &cos_sup)
        } else {
            (&sin_inf, &sin_sup)
        };
        let pole_possible = denom_inf.signe_positif() != denom_sup.signe_positif()
            || denom_inf.est_nul()
            || denom_sup.est_nul();
        if !pole_possible {
            return Ok((sin_inf, cos_inf, sin_sup, cos_sup));
        }
        if donnees.curseur.precision >= donnees.curseur.precision_max {
            return Err(Erreur::PrecisionMaxTrigonometrique);
        }
        let cible = donnees.curseur.precision + 1;
        trace!("trigonométrie : pôle possible dans l'encadrement, affinage vers {cible}");
        rattrape(gauche, cible)?;
        donnees.curseur.precision = cible;
    }
}

fn tangente(donnees: &mut Donnees, gauche: &Partage) -> Result<(), Erreur> {
    let (sin_inf, cos_inf, sin_sup, cos_sup) = separe_du_pole(donnees, gauche, true)?;
    let p = donnees.curseur.precision;
    let numerateur = Intervalle::ordonne(sin_inf, sin_sup);
    let denominateur = Intervalle::ordonne(cos_inf, cos_sup);
    donnees.curseur.intervalle = divise_intervalles(&numerateur, &denominateur, p)?;
    Ok(())
}

fn cotangente(donnees: &mut Donnees, gauche: &Partage) -> Result<(), Erreur> {
    let (sin_inf, cos_inf, sin_sup, cos_sup) = separe_du_pole(donnees, gauche, false)?;
    let p = donnees.curseur.precision;
    let numerateur = Intervalle::ordonne(cos_inf, cos_sup);
    let denominateur = Intervalle::ordonne(sin_inf, sin_sup);
    donnees.curseur.intervalle = divise_intervalles(&numerateur, &denominateur, p)?;
    Ok(())
}

fn secante(donnees: &mut Donnees, gauche: &Partage) -> Result<(), Erreur> {
    let (sin_inf, cos_inf, sin_sup, cos_sup) = separe_du_pole(donnees, gauche, true)?;
    let p = donnees.curseur.precision;

    // la dérivée sec·tan change de signe avec sin : extremum intérieur en ±1
    donnees.curseur.intervalle = if sin_inf.signe_positif() != sin_sup.signe_positif() {
        if cos_sup.signe_positif() {
            // cos atteint 1 à l'intérieur : minimum de la sécante = 1
            let denom = if cos_sup > cos_inf { &cos_inf } else { &cos_sup };
            Intervalle {
                borne_inf: NombreExact::un(),
                borne_sup: NombreExact::un().divise(denom, p, true)?,
            }
        } else {
            // cos atteint −1 à l'intérieur : maximum de la sécante = −1
            let denom = if cos_sup > cos_inf { &cos_sup } else { &cos_inf };
            Intervalle {
                borne_inf: NombreExact::un().divise(denom, p, false)?,
                borne_sup: NombreExact::moins_un(),
            }
        }
    } else {
        divise_intervalles(
            &Intervalle::ponctuel(NombreExact::un()),
            &Intervalle::ordonne(cos_inf, cos_sup),
            p,
        )?
    };
    Ok(())
}

fn cosecante(donnees: &mut Donnees, gauche: &Partage) -> Result<(), Erreur> {
    let (sin_inf, cos_inf, sin_sup, cos_sup) = separe_du_pole(donnees, gauche, false)?;
    let p = donnees.curseur.precision;

    donnees.curseur.intervalle = if cos_inf.signe_positif() != cos_sup.signe_positif() {
        if sin_sup.signe_positif() {
            // sin atteint 1 à l'intérieur : minimum de la cosécante = 1
            let denom = if sin_sup > sin_inf { &sin_inf } else { &sin_sup };
            Intervalle {
                borne_inf: NombreExact::un(),
                borne_sup: NombreExact::un().divise(denom, p, true)?,
            }
        } else {
            // sin atteint −1 à l'intérieur : maximum de la cosécante = −1
            let denom = if sin_sup > sin_inf { &sin_sup } else { &sin_inf };
            Intervalle {
                borne_inf: NombreExact::un().divise(denom, p, false)?,
                borne_sup: NombreExact::moins_un(),
            }
        }
    } else {
        divise_intervalles(
            &Intervalle::ponctuel(NombreExact::un()),
            &Intervalle::ordonne(sin_inf, sin_sup),
            p,
        )?
    };
    Ok(())
}
