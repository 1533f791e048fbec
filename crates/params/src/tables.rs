//! The registry table.
//!
//! Planet rows are the Standish long-form Keplerian elements and rates
//! (mean ecliptic and equinox of J2000, valid 3000 BC – AD 3000) in the
//! published column order a, e, I, L, ϖ, Ω followed by the per-century
//! rates; Jupiter through Pluto additionally carry the Table-2b
//! mean-anomaly augmentation. The Earth row describes the Earth-Moon
//! barycenter (see the note on the Keplerian ephemeris source).
//!
//! Small bodies use perihelion-passage osculating elements from the JPL
//! small-body database. Moon fallback rows are osculating values relative
//! to the center body, uncorrected for epoch; kernel-backed sources take
//! precedence over them whenever one covers the requested instant.

use orrery_core::constants::ASTRONOMICAL_UNIT_M;
use orrery_kepler::{ElementSet, MeanAnomalyCorrection, PlanetaryElements, SmallBodyElements};

use crate::{BodyClass, BodyRecord};

const fn planetary(
    row: [f64; 12],
    correction: Option<MeanAnomalyCorrection>,
) -> Option<ElementSet> {
    Some(ElementSet::Planetary(PlanetaryElements {
        semi_major_axis_au: row[0],
        eccentricity: row[1],
        inclination_deg: row[2],
        mean_longitude_deg: row[3],
        long_perihelion_deg: row[4],
        long_asc_node_deg: row[5],
        semi_major_axis_au_per_cy: row[6],
        eccentricity_per_cy: row[7],
        inclination_deg_per_cy: row[8],
        mean_longitude_deg_per_cy: row[9],
        long_perihelion_deg_per_cy: row[10],
        long_asc_node_deg_per_cy: row[11],
        correction,
    }))
}

const fn small_body(row: [f64; 7]) -> Option<ElementSet> {
    Some(ElementSet::SmallBody(SmallBodyElements {
        semi_major_axis_au: row[0],
        eccentricity: row[1],
        inclination_deg: row[2],
        arg_perihelion_deg: row[3],
        long_asc_node_deg: row[4],
        perihelion_passage_jd: row[5],
        mean_motion_deg_per_day: row[6],
    }))
}

/// Moon fallback in small-body form: shape and mean motion only, node,
/// perihelion, and passage epoch left at zero as in the source data.
const fn moon_fallback(
    a_au: f64,
    e: f64,
    i_deg: f64,
    mean_motion_deg_per_day: f64,
) -> Option<ElementSet> {
    Some(ElementSet::SmallBody(SmallBodyElements {
        semi_major_axis_au: a_au,
        eccentricity: e,
        inclination_deg: i_deg,
        arg_perihelion_deg: 0.0,
        long_asc_node_deg: 0.0,
        perihelion_passage_jd: 0.0,
        mean_motion_deg_per_day,
    }))
}

pub static BODIES: &[BodyRecord] = &[
    BodyRecord {
        name: "Sun",
        class: BodyClass::Star,
        mass_kg: 1.9885e30,
        mu_m3_s2: Some(1.3271244001798698e20),
        diameter_m: 1.3914e9,
        elements: None,
        center_body: None,
    },
    // Planets (Standish tables 2a/2b).
    BodyRecord {
        name: "Mercury",
        class: BodyClass::Planet,
        mass_kg: 0.33011e24,
        mu_m3_s2: Some(2.2032080486417923e13),
        diameter_m: 4.879e6,
        elements: planetary(
            [
                0.38709843, 0.20563661, 7.00559432, 252.25166724, 77.45771895, 48.33961819,
                0.00000000, 0.00002123, -0.00590158, 149472.67486623, 0.15940013, -0.12214182,
            ],
            None,
        ),
        center_body: None,
    },
    BodyRecord {
        name: "Venus",
        class: BodyClass::Planet,
        mass_kg: 4.8675e24,
        mu_m3_s2: Some(3.2485859882645978e14),
        diameter_m: 1.2104e7,
        elements: planetary(
            [
                0.72332102, 0.00676399, 3.39777545, 181.97970850, 131.76755713, 76.67261496,
                -0.00000026, -0.00005107, 0.00043494, 58517.81560260, 0.05679648, -0.27274174,
            ],
            None,
        ),
        center_body: None,
    },
    BodyRecord {
        name: "Earth",
        class: BodyClass::Planet,
        mass_kg: 5.9723e24,
        mu_m3_s2: Some(3.9860043289693922e14),
        diameter_m: 1.2756e7,
        // Earth-Moon barycenter row.
        elements: planetary(
            [
                1.00000018, 0.01673163, -0.00054346, 100.46691572, 102.93005885, -5.11260389,
                -0.00000003, -0.00003661, -0.01337178, 35999.37306329, 0.31795260, -0.24123856,
            ],
            None,
        ),
        center_body: None,
    },
    BodyRecord {
        name: "Mars",
        class: BodyClass::Planet,
        mass_kg: 0.64171e24,
        mu_m3_s2: Some(4.2828314258067119e13),
        diameter_m: 6.792e6,
        elements: planetary(
            [
                1.52371243, 0.09336511, 1.85181869, -4.56813164, -23.91744784, 49.71320984,
                0.00000097, 0.00009149, -0.00724757, 19140.29934243, 0.45223625, -0.26852431,
            ],
            None,
        ),
        center_body: None,
    },
    BodyRecord {
        name: "Jupiter",
        class: BodyClass::Planet,
        mass_kg: 1898.19e24,
        mu_m3_s2: Some(1.26712767857796e17),
        diameter_m: 1.42984e8,
        elements: planetary(
            [
                5.20248019, 0.04853590, 1.29861416, 34.33479152, 14.27495244, 100.29282654,
                -0.00002864, 0.00018026, -0.00322699, 3034.90371757, 0.18199196, 0.13024619,
            ],
            Some(MeanAnomalyCorrection {
                b: -0.00012452,
                c: 0.06064060,
                s: -0.35635438,
                f_deg: 38.35125000,
            }),
        ),
        center_body: None,
    },
    BodyRecord {
        name: "Saturn",
        class: BodyClass::Planet,
        mass_kg: 568.34e24,
        mu_m3_s2: Some(3.7940626061137281e16),
        diameter_m: 1.20536e8,
        elements: planetary(
            [
                9.54149883, 0.05550825, 2.49424102, 50.07571329, 92.86136063, 113.63998702,
                -0.00003065, -0.00032044, 0.00451969, 1222.11494724, 0.54179478, -0.25015002,
            ],
            Some(MeanAnomalyCorrection {
                b: 0.00025899,
                c: -0.13434469,
                s: 0.87320147,
                f_deg: 38.35125000,
            }),
        ),
        center_body: None,
    },
    BodyRecord {
        name: "Uranus",
        class: BodyClass::Planet,
        mass_kg: 86.813e24,
        mu_m3_s2: Some(5.7945490070718741e15),
        diameter_m: 5.1118e7,
        elements: planetary(
            [
                19.18797948, 0.04685740, 0.77298127, 314.20276625, 172.43404441, 73.96250215,
                -0.00020455, -0.00001550, -0.00180155, 428.49512595, 0.09266985, 0.05739699,
            ],
            Some(MeanAnomalyCorrection {
                b: 0.00058331,
                c: -0.97731848,
                s: 0.17689245,
                f_deg: 7.67025000,
            }),
        ),
        center_body: None,
    },
    BodyRecord {
        name: "Neptune",
        class: BodyClass::Planet,
        mass_kg: 102.413e24,
        mu_m3_s2: Some(6.8365340638792608e15),
        diameter_m: 4.9528e7,
        elements: planetary(
            [
                30.06952752, 0.00895439, 1.77005520, 304.22289287, 46.68158724, 131.78635853,
                0.00006447, 0.00000818, 0.00022400, 218.46515314, 0.01009938, -0.00606302,
            ],
            Some(MeanAnomalyCorrection {
                b: -0.00041348,
                c: 0.68346318,
                s: -0.10162547,
                f_deg: 7.67025000,
            }),
        ),
        center_body: None,
    },
    BodyRecord {
        name: "Pluto",
        class: BodyClass::Planet,
        mass_kg: 0.01303e24,
        mu_m3_s2: Some(9.816008877070044e11),
        diameter_m: 2.370e6,
        elements: planetary(
            [
                39.48686035, 0.24885238, 17.14104260, 238.96535011, 224.09702598, 110.30167986,
                0.00449751, 0.00006016, 0.00000501, 145.18042903, -0.00968827, -0.00809981,
            ],
            Some(MeanAnomalyCorrection {
                b: -0.01262724,
                c: 0.0,
                s: 0.0,
                f_deg: 0.0,
            }),
        ),
        center_body: None,
    },
    // Dwarf planets, asteroids, and comets (JPL SBDB osculating elements).
    BodyRecord {
        name: "Eris",
        class: BodyClass::Planet,
        mass_kg: 1.66e22,
        mu_m3_s2: Some(1.1089e12),
        diameter_m: 2.326e6,
        elements: small_body([
            67.64968008508858,
            0.4417142619088136,
            44.20390955432094,
            151.5223022346903,
            35.87791199490014,
            2545575.799683113451,
            0.001771354370292503,
        ]),
        center_body: None,
    },
    BodyRecord {
        name: "Chiron",
        class: BodyClass::Planet,
        mass_kg: 2.7e18,
        mu_m3_s2: None,
        diameter_m: 2.33e5,
        elements: small_body([
            13.64821600709919,
            0.3822544351242399,
            6.949678708401436,
            339.6766969686663,
            209.200869875238,
            2450143.772120038983,
            0.01954745593835608,
        ]),
        center_body: None,
    },
    BodyRecord {
        name: "Ceres",
        class: BodyClass::Planet,
        mass_kg: 9.393e20,
        mu_m3_s2: Some(6.26284e10),
        diameter_m: 9.46e5,
        elements: small_body([
            2.767409329208225,
            0.07560729117115973,
            10.59321706277403,
            73.02374264688446,
            80.3088826123586,
            2458236.411182414352,
            0.2140888123385267,
        ]),
        center_body: None,
    },
    BodyRecord {
        name: "Pallas",
        class: BodyClass::Planet,
        mass_kg: 2.11e20,
        mu_m3_s2: Some(1.43e10),
        diameter_m: 5.12e5,
        elements: small_body([
            2.773085152812061,
            0.2305974109006172,
            34.83791913233102,
            309.9915581445374,
            173.0871774252975,
            2458320.736325116834,
            0.213431868021857,
        ]),
        center_body: None,
    },
    BodyRecord {
        name: "Juno",
        class: BodyClass::Planet,
        mass_kg: 2.67e19,
        mu_m3_s2: None,
        diameter_m: 2.33e5,
        elements: small_body([
            2.668531209360437,
            0.256853452328373,
            12.98996127586185,
            248.2064931516843,
            169.8582922221972,
            2458446.171166688112,
            0.2260974396170018,
        ]),
        center_body: None,
    },
    BodyRecord {
        name: "Vesta",
        class: BodyClass::Planet,
        mass_kg: 2.59076e20,
        mu_m3_s2: Some(1.78e10),
        diameter_m: 5.254e5,
        elements: small_body([
            2.361777559799509,
            0.08915261042902074,
            7.140019358926029,
            150.9430865320649,
            103.8358792056089,
            2458248.301104802767,
            0.2715473607287919,
        ]),
        center_body: None,
    },
    BodyRecord {
        name: "Eros",
        class: BodyClass::Planet,
        mass_kg: 6.687e15,
        mu_m3_s2: Some(4.463e5),
        diameter_m: 1.684e4,
        elements: small_body([
            1.457940027169433,
            0.2225889698361087,
            10.82759100791667,
            178.8165910772738,
            304.3221633760257,
            2457873.186399170510,
            0.559879523918286,
        ]),
        center_body: None,
    },
    BodyRecord {
        name: "Halley",
        class: BodyClass::Planet,
        mass_kg: 2.2e14,
        mu_m3_s2: None,
        diameter_m: 1.1e4,
        elements: small_body([
            17.83414429255373,
            0.9671429084623044,
            162.2626905791606,
            111.3324851045177,
            58.42008097656843,
            2446467.395317050925,
            0.01308656479244564,
        ]),
        center_body: None,
    },
    BodyRecord {
        name: "Encke",
        class: BodyClass::Planet,
        mass_kg: 9.2e15,
        mu_m3_s2: None,
        diameter_m: 2.6e3,
        elements: small_body([
            2.215103855763232,
            0.8482929263100047,
            11.78089864093374,
            186.5416777104336,
            334.5688235640465,
            2456618.220238561292,
            0.2989598963807595,
        ]),
        center_body: None,
    },
    BodyRecord {
        name: "67P/Churyumov-Gerasimenko",
        class: BodyClass::Planet,
        mass_kg: 9.982e12,
        mu_m3_s2: None,
        diameter_m: 4.1e3,
        elements: small_body([
            3.464737502510219,
            0.6405823233437267,
            7.043680712713979,
            12.69446409956478,
            50.18004588418096,
            2454891.027525088560,
            0.1528264653077319,
        ]),
        center_body: None,
    },
    BodyRecord {
        name: "Shoemaker-Levy 9",
        class: BodyClass::Planet,
        mass_kg: 1.0e13,
        mu_m3_s2: None,
        diameter_m: 1.0e4,
        elements: small_body([
            6.86479462772464,
            0.216209166902718,
            6.00329387351007,
            354.8935191875186,
            220.5376550079234,
            2449435.603196492293,
            0.05479775297461272,
        ]),
        center_body: None,
    },
    BodyRecord {
        name: "Hale-Bopp",
        class: BodyClass::Planet,
        mass_kg: 1.0e13,
        mu_m3_s2: None,
        diameter_m: 8.0e4,
        elements: small_body([
            191.0064717884599,
            0.995213296666182,
            89.43269534883738,
            130.5768076894707,
            282.4722897964125,
            2450539.628109521717,
            0.0003733635782842797,
        ]),
        center_body: None,
    },
    BodyRecord {
        name: "Florence",
        class: BodyClass::Planet,
        mass_kg: 1.0e13,
        mu_m3_s2: None,
        diameter_m: 4.9e3,
        elements: small_body([
            1.769132445343428,
            0.4233004309875272,
            22.15078418498147,
            27.84698807748255,
            336.0951180796379,
            2458020.940196224544,
            0.418854854065512,
        ]),
        center_body: None,
    },
    // Moons. Fallback elements, where present, are relative to the center
    // body and uncorrected for epoch.
    BodyRecord {
        name: "Moon",
        class: BodyClass::Moon,
        mass_kg: 0.07346e24,
        mu_m3_s2: Some(4.9028005821477636e12),
        diameter_m: 3.475e6,
        elements: moon_fallback(3.844e8 / ASTRONOMICAL_UNIT_M, 0.05490, 5.145, 360.0 / 27.321582),
        center_body: Some("Earth"),
    },
    BodyRecord {
        name: "Io",
        class: BodyClass::Moon,
        mass_kg: 8.9319e22,
        mu_m3_s2: Some(5.959916e12),
        diameter_m: 3.6432e6,
        elements: moon_fallback(4.218e8 / ASTRONOMICAL_UNIT_M, 0.0041, 2.21, 360.0 / 1.769138),
        center_body: Some("Jupiter"),
    },
    BodyRecord {
        name: "Europa",
        class: BodyClass::Moon,
        mass_kg: 4.7998e22,
        mu_m3_s2: Some(3.202739e12),
        diameter_m: 3.1216e6,
        elements: moon_fallback(6.711e8 / ASTRONOMICAL_UNIT_M, 0.0094, 2.47, 360.0 / 3.551181),
        center_body: Some("Jupiter"),
    },
    BodyRecord {
        name: "Ganymede",
        class: BodyClass::Moon,
        mass_kg: 1.4819e23,
        mu_m3_s2: Some(9.887834e12),
        diameter_m: 5.2682e6,
        elements: moon_fallback(1.0704e9 / ASTRONOMICAL_UNIT_M, 0.0013, 2.31, 360.0 / 7.154553),
        center_body: Some("Jupiter"),
    },
    BodyRecord {
        name: "Callisto",
        class: BodyClass::Moon,
        mass_kg: 1.0759e23,
        mu_m3_s2: Some(7.179289e12),
        diameter_m: 4.8206e6,
        elements: moon_fallback(1.8827e9 / ASTRONOMICAL_UNIT_M, 0.0074, 2.02, 360.0 / 16.689017),
        center_body: Some("Jupiter"),
    },
    BodyRecord {
        name: "Mimas",
        class: BodyClass::Moon,
        mass_kg: 3.7493e19,
        mu_m3_s2: Some(2.503522e9),
        diameter_m: 3.964e5,
        elements: None,
        center_body: Some("Saturn"),
    },
    BodyRecord {
        name: "Enceladus",
        class: BodyClass::Moon,
        mass_kg: 1.08022e20,
        mu_m3_s2: Some(7.211292e9),
        diameter_m: 5.042e5,
        elements: None,
        center_body: Some("Saturn"),
    },
    BodyRecord {
        name: "Tethys",
        class: BodyClass::Moon,
        mass_kg: 6.17449e20,
        mu_m3_s2: Some(4.121e10),
        diameter_m: 1.0622e6,
        elements: None,
        center_body: Some("Saturn"),
    },
    BodyRecord {
        name: "Dione",
        class: BodyClass::Moon,
        mass_kg: 1.095452e21,
        mu_m3_s2: Some(7.3113e10),
        diameter_m: 1.1228e6,
        elements: None,
        center_body: Some("Saturn"),
    },
    BodyRecord {
        name: "Rhea",
        class: BodyClass::Moon,
        mass_kg: 2.306518e21,
        mu_m3_s2: Some(1.5394e11),
        diameter_m: 1.5276e6,
        elements: None,
        center_body: Some("Saturn"),
    },
    BodyRecord {
        name: "Titan",
        class: BodyClass::Moon,
        mass_kg: 1.3452e23,
        mu_m3_s2: Some(8.9781382e12),
        diameter_m: 5.1495e6,
        elements: moon_fallback(1.22187e9 / ASTRONOMICAL_UNIT_M, 0.0288, 27.1, 360.0 / 15.945421),
        center_body: Some("Saturn"),
    },
    BodyRecord {
        name: "Hyperion",
        class: BodyClass::Moon,
        mass_kg: 5.6199e18,
        mu_m3_s2: Some(3.727e8),
        diameter_m: 2.70e5,
        elements: None,
        center_body: Some("Saturn"),
    },
    BodyRecord {
        name: "Iapetus",
        class: BodyClass::Moon,
        mass_kg: 1.805635e21,
        mu_m3_s2: Some(1.205e11),
        diameter_m: 1.4686e6,
        elements: None,
        center_body: Some("Saturn"),
    },
    BodyRecord {
        name: "Phoebe",
        class: BodyClass::Moon,
        mass_kg: 8.292e18,
        mu_m3_s2: Some(5.534e8),
        diameter_m: 2.13e5,
        elements: None,
        center_body: Some("Saturn"),
    },
    BodyRecord {
        name: "Miranda",
        class: BodyClass::Moon,
        mass_kg: 6.59e19,
        mu_m3_s2: Some(4.4e9),
        diameter_m: 4.716e5,
        elements: None,
        center_body: Some("Uranus"),
    },
    BodyRecord {
        name: "Ariel",
        class: BodyClass::Moon,
        mass_kg: 1.353e21,
        mu_m3_s2: Some(9.03e10),
        diameter_m: 1.1578e6,
        elements: None,
        center_body: Some("Uranus"),
    },
    BodyRecord {
        name: "Umbriel",
        class: BodyClass::Moon,
        mass_kg: 1.172e21,
        mu_m3_s2: Some(7.82e10),
        diameter_m: 1.1694e6,
        elements: None,
        center_body: Some("Uranus"),
    },
    BodyRecord {
        name: "Titania",
        class: BodyClass::Moon,
        mass_kg: 3.527e21,
        mu_m3_s2: Some(2.354e11),
        diameter_m: 1.5768e6,
        elements: None,
        center_body: Some("Uranus"),
    },
    BodyRecord {
        name: "Oberon",
        class: BodyClass::Moon,
        mass_kg: 3.014e21,
        mu_m3_s2: Some(2.011e11),
        diameter_m: 1.5228e6,
        elements: None,
        center_body: Some("Uranus"),
    },
    BodyRecord {
        name: "Triton",
        class: BodyClass::Moon,
        mass_kg: 2.139e22,
        mu_m3_s2: Some(1.4276e12),
        diameter_m: 2.7068e6,
        elements: moon_fallback(3.54759e8 / ASTRONOMICAL_UNIT_M, 0.000016, 130.1, 360.0 / 5.876854),
        center_body: Some("Neptune"),
    },
];
