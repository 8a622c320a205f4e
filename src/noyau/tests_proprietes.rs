//! Campagne propriétés : invariants du raffinement sous fuzz déterministe.
//!
//! But : marteler l'itérateur sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée, valeurs rationnelles donc exactement vérifiables
//! - budget temps global
//!
//! Invariants vérifiés :
//! - encadrement : la valeur exacte reste dans [borne_inf, borne_sup]
//! - raffinement monotone : la borne basse ne descend jamais, la haute ne
//!   monte jamais
//! - aller-retour lecture/affichage sur formes canoniques
//! - cohérence de signe du produit de deux positifs

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;
use std::time::{Duration, Instant};

use super::lecture::lit_decimal;
use super::nombre::NombreExact;
use super::reel::Reel;

/* ------------------------ RNG déterministe minimal ------------------------ */

struct Rng {
    etat: u64,
}

impl Rng {
    fn new(seed: u64) -> Self {
        Self { etat: seed }
    }
    fn next_u32(&mut self) -> u32 {
        self.etat = self.etat.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.etat >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(depart: Instant, max: Duration) {
    if depart.elapsed() > max {
        panic!("budget temps dépassé: {max:?}");
    }
}

/* ------------------------ Génération d'expressions ------------------------ */

fn lit(texte: &str) -> NombreExact {
    lit_decimal(texte).unwrap_or_else(|e| panic!("lecture {texte:?}: {e}"))
}

/// Feuille rationnelle non nulle, accompagnée de sa valeur exacte.
fn gen_feuille(rng: &mut Rng) -> (Reel, BigRational) {
    let n = i64::from(rng.pick(17)) - 8; // -8..=8
    let n = if n == 0 { 1 } else { n };
    let d = i64::from(rng.pick(9)) + 1; // 1..=9
    let reel = Reel::rationnel(n, d).unwrap_or_else(|e| panic!("rationnel {n}/{d}: {e}"));
    (reel, BigRational::new(BigInt::from(n), BigInt::from(d)))
}

/// Expression aléatoire de profondeur bornée, valeur exacte en parallèle.
/// La division n'est gardée que si le diviseur est exactement non nul.
fn gen_expr(rng: &mut Rng, profondeur: usize) -> (Reel, BigRational) {
    if profondeur == 0 {
        return gen_feuille(rng);
    }
    let (a, va) = gen_expr(rng, profondeur - 1);
    let (b, vb) = gen_expr(rng, profondeur - 1);
    match rng.pick(4) {
        0 => (&a + &b, va + vb),
        1 => (&a - &b, va - vb),
        2 => (&a * &b, va * vb),
        _ => {
            if vb.is_zero() {
                (&a + &b, va + vb)
            } else {
                (&a / &b, va / vb)
            }
        }
    }
}

fn contient_exactement(intervalle: &super::intervalle::Intervalle, valeur: &BigRational) -> bool {
    intervalle.borne_inf.vers_rationnel() <= *valeur
        && *valeur <= intervalle.borne_sup.vers_rationnel()
}

/* ------------------------ Invariants sous fuzz ------------------------ */

#[test]
fn prop_encadrement_et_monotonie() {
    let depart = Instant::now();
    let max = Duration::from_millis(2500);
    let mut rng = Rng::new(0xC0FFEE_u64);

    for tour in 0..60 {
        budget(depart, max);
        let (expr, exact) = gen_expr(&mut rng, 3);

        let mut it = expr
            .iterateur()
            .unwrap_or_else(|e| panic!("tour {tour}: {e}"));
        let mut precedent = it.intervalle();
        assert!(
            contient_exactement(&precedent, &exact),
            "tour {tour}: {} hors de {precedent}",
            exact
        );

        for cran in 0..5 {
            let courant = it
                .avance()
                .unwrap_or_else(|e| panic!("tour {tour} cran {cran}: {e}"));
            assert!(
                contient_exactement(&courant, &exact),
                "tour {tour} cran {cran}: {} hors de {courant}",
                exact
            );
            assert!(
                courant.borne_inf >= precedent.borne_inf,
                "tour {tour} cran {cran}: borne basse en recul"
            );
            assert!(
                courant.borne_sup <= precedent.borne_sup,
                "tour {tour} cran {cran}: borne haute en avance"
            );
            precedent = courant;
        }
    }
}

#[test]
fn prop_commutativite_en_valeur() {
    let depart = Instant::now();
    let max = Duration::from_millis(1500);
    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..30 {
        budget(depart, max);
        let (a, _va) = gen_expr(&mut rng, 2);
        let (b, _vb) = gen_expr(&mut rng, 2);

        let (gauche, droite) = if rng.coin() {
            (&a + &b, &b + &a)
        } else {
            (&a * &b, &b * &a)
        };
        let ig = gauche.approximation(6).unwrap_or_else(|e| panic!("{e}"));
        let id = droite.approximation(6).unwrap_or_else(|e| panic!("{e}"));

        // les encadrements peuvent différer en largeur mais se recouvrent
        assert!(ig.borne_inf <= id.borne_sup, "{ig} et {id} disjoints");
        assert!(id.borne_inf <= ig.borne_sup, "{ig} et {id} disjoints");
    }
}

#[test]
fn prop_aller_retour_lecture() {
    let depart = Instant::now();
    let max = Duration::from_millis(500);
    let mut rng = Rng::new(0xFEED_u64);

    for _ in 0..200 {
        budget(depart, max);

        // forme canonique : premier et dernier chiffre non nuls
        let longueur = rng.pick(5) as usize + 1;
        let mut chiffres: Vec<u8> = Vec::with_capacity(longueur);
        for i in 0..longueur {
            let bord = i == 0 || i == longueur - 1;
            let c = if bord {
                rng.pick(9) as u8 + 1
            } else {
                rng.pick(10) as u8
            };
            chiffres.push(c);
        }
        let exposant = i64::from(rng.pick(12)) - 5;
        let positif = rng.coin();

        let nombre = NombreExact::nouveau(chiffres, exposant, positif);
        let texte = nombre.to_string();
        let relu = lit(&texte);
        assert_eq!(relu, nombre, "aller-retour {texte:?}");
    }
}

#[test]
fn prop_signe_du_produit_de_positifs() {
    let depart = Instant::now();
    let max = Duration::from_millis(500);
    let mut rng = Rng::new(0xACE_u64);

    for _ in 0..40 {
        budget(depart, max);
        let n = i64::from(rng.pick(50)) + 1;
        let d = i64::from(rng.pick(50)) + 1;
        let a = Reel::rationnel(n, d).unwrap_or_else(|e| panic!("{e}"));
        let b = Reel::rationnel(d, n).unwrap_or_else(|e| panic!("{e}"));
        let produit = &a * &b;

        // la positivité doit apparaître à une précision finie
        let mut it = produit.iterateur().unwrap_or_else(|e| panic!("{e}"));
        let mut positif = it.intervalle().positif();
        for _ in 0..10 {
            if positif {
                break;
            }
            positif = it.avance().unwrap_or_else(|e| panic!("{e}")).positif();
        }
        assert!(positif, "produit de positifs jamais positif : {n}/{d}");
    }
}

#[test]
fn prop_inverse_addition() {
    // (a + b) − b doit se resserrer sur a, même avec des feuilles
    // algorithmiques jamais épuisées
    let a = Reel::algorithme(|n| ((n % 7) + 1) as u8, 1, true);
    let b = Reel::algorithme(|n| ((n % 5) + 2) as u8, 0, true);
    let expr = &(&a + &b) - &b;

    let intervalle = expr.approximation(8).unwrap_or_else(|e| panic!("{e}"));
    assert!(intervalle.largeur() <= lit("0.0001"));

    // l'encadrement de l'expression recouvre celui de a
    let cible = a.approximation(12).unwrap_or_else(|e| panic!("{e}"));
    assert!(intervalle.borne_inf <= cible.borne_sup);
    assert!(cible.borne_inf <= intervalle.borne_sup);
}

#[test]
fn prop_largeur_divisee_par_dix() {
    // un cran de précision sur une feuille algorithmique divise la largeur
    // par la base
    let x = Reel::algorithme(|n| ((n * 3 % 9) + 1) as u8, 0, true);
    let mut it = x.iterateur().unwrap_or_else(|e| panic!("{e}"));
    let mut largeur = it.intervalle().largeur();
    for _ in 0..8 {
        let suivante = it.avance().unwrap_or_else(|e| panic!("{e}")).largeur();
        assert_eq!(
            &suivante * &lit("10"),
            largeur,
            "largeur non divisée par dix"
        );
        largeur = suivante;
    }
}
