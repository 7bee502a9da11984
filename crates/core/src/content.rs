//! Static devotional text for the Novena de Aguinaldos.
//!
//! The prayers shared by every day are constants; the per-day theme,
//! consideration and carol are looked up by [`DayNumber`].

use crate::types::DayNumber;

/// Content specific to one day of the novena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NovenaDay {
    pub number: DayNumber,
    pub theme: &'static str,
    pub consideration: &'static str,
    pub carol: &'static str,
}

impl NovenaDay {
    /// Date label in Spanish, e.g. `"16 de diciembre"`.
    #[must_use]
    pub fn date_label(&self) -> String {
        format!("{} de diciembre", self.number.december_date())
    }

    /// Carol text split into lines.
    pub fn carol_lines(&self) -> impl Iterator<Item = &'static str> {
        self.carol.lines()
    }
}

pub const PRAYER_FOR_EVERY_DAY: &[&str] = &[
    "Benignísimo Dios de infinita caridad, que tanto amasteis a los hombres, \
     que les dísteis en vuestro hijo la prenda de vuestro amor, para que hecho \
     hombre en las entrañas de una Virgen naciese en un pesebre para nuestra \
     salud y remedio; yo, en nombre de todos los mortales, os doy infinitas \
     gracias por tan soberano beneficio.",
    "En retorno de él os ofrezco la pobreza, humildad y demás virtudes de \
     vuestro hijo humanado, suplicándoos por sus divinos méritos, por las \
     incomodidades en que nació y por las tiernas lágrimas que derramó en el \
     pesebre, que dispongáis nuestros corazones con humildad profunda, con \
     amor encendido, con tal desprecio de todo lo terreno, para que Jesús \
     recién nacido tenga en ellos su cuna y more eternamente. Amén.",
];

pub const PRAYER_FOR_EVERY_DAY_NOTE: &str = "(Se reza tres veces Gloria al Padre)";

pub const PRAYER_TO_MARY: &str = "Soberana María, que por vuestras grandes virtudes y \
     especialmente por vuestra humildad, merecisteis que todo un Dios os \
     escogiese por madre suya, os suplico que vos misma preparéis y \
     dispongáis mi alma y la de todos los que en este tiempo hiciesen esta \
     novena, para el nacimiento espiritual de vuestro adorado hijo. ¡Oh \
     dulcísima madre!, comunicadme algo del profundo recogimiento y divina \
     ternura con que lo aguardasteis vos, para que nos hagáis menos indignos \
     de verle, amarle y adorarle por toda la eternidad. Amén. (Se reza tres \
     veces Dios te salve María).";

pub const PRAYER_TO_JOSEPH: &str = "¡Oh santísimo José, esposo de María y padre adoptivo de \
     Jesús! Infinitas gracias doy a Dios porque os escogió para tan soberanos \
     ministerios y os adornó con todos los dones proporcionados a tan \
     excelente grandeza. Os ruego, por el amor que tuvisteis al Divino Niño, \
     me abraséis en fervorosos deseos de verle y recibirle sacramentalmente, \
     mientras en su divina esencia le veo y le gozo en el cielo. Amén. (Se \
     reza un Padrenuestro, un Avemaría y un Gloria).";

pub const JOYS_CHORUS: &str =
    "Dulce Jesús mío, mi niño adorado ¡Ven a nuestras almas! ¡Ven no tardes tanto!";

pub const JOYS: &[&str] = &[
    "¡Oh, Sapiencia suma del Dios soberano, que a infantil alcance te rebajas \
     sacro! ¡Oh, Divino Niño, ven para enseñarnos la prudencia que hace \
     verdaderos sabios!",
    "¡Oh, Adonaí potente que a Moisés hablando, de Israel al pueblo diste los \
     mandatos! ¡Ah, ven prontamente para rescatarnos, y que un niño débil \
     muestre fuerte el brazo!",
    "¡Oh, raíz sagrada de José que en lo alto presentas al orbe tu fragante \
     nardo! ¡Dulcísimo Niño que has sido llamado lirio de los valles, bella \
     flor del campo!",
];

pub const PRAYER_TO_CHILD_JESUS: &str = "Acordaos, ¡oh dulcísimo Niño Jesús!, que dijisteis a la \
     venerable Margarita del santísimo Sacramento, y en persona suya a todos \
     vuestros devotos, estas palabras tan consoladoras para nuestra pobre \
     humanidad agobiada y doliente: «Todo lo que quieras pedir, pídelo por \
     los méritos de mi infancia y nada te será negado». Llenos de confianza \
     en vos, ¡oh Jesús!, que sois la misma verdad, venimos a exponeros toda \
     nuestra miseria. Ayúdanos a llevar una vida santa, para conseguir una \
     eternidad bienaventurada. Concédenos, por los méritos infinitos de \
     vuestra infancia, la gracia de la cual necesitamos tanto. Nos entregamos \
     a vos, ¡oh Niño omnipotente!, seguros de que no quedará frustrada \
     nuestra esperanza, y de que, en virtud de vuestra divina promesa, \
     acogeréis y despacharéis favorablemente nuestra súplica. Amén.";

const THEMES: [&str; 9] = [
    "El anuncio del Ángel a María",
    "La visita de María a su prima Isabel",
    "El nacimiento de Juan el Bautista",
    "La anunciación del nacimiento de Jesús a José",
    "El viaje de María y José a Belén",
    "El nacimiento del Niño Jesús",
    "La adoración de los pastores",
    "La presentación del Niño Jesús en el templo",
    "La adoración de los Reyes Magos",
];

const CONSIDERATIONS: [&str; 9] = [
    "Meditemos en el anuncio del Ángel Gabriel a María. Con humildad y fe, \
     María acepta la voluntad de Dios y se convierte en la Madre del Salvador.",
    "Reflexionemos sobre la visita de María a su prima Isabel. Con caridad y \
     servicio, María lleva a Jesús en su vientre para compartir la alegría de \
     la salvación.",
    "Contemplemos el nacimiento de Juan el Bautista, quien preparó el camino \
     del Señor. Que nosotros también preparemos nuestros corazones para \
     recibir a Jesús.",
    "Meditemos en cómo el Ángel anuncia a José el nacimiento de Jesús. Con fe \
     y obediencia, José acepta su misión de ser padre adoptivo del Salvador.",
    "Acompañemos a María y José en su viaje a Belén. A pesar de las \
     dificultades, confían en Dios y cumplen su voluntad.",
    "Adoremos al Niño Jesús recién nacido en el pesebre. El Hijo de Dios se \
     hace pequeño y pobre por amor a nosotros.",
    "Imitemos a los pastores que adoraron al Niño Jesús. Con sencillez y \
     alegría, reconocemos en Él a nuestro Salvador.",
    "Reflexionemos sobre la presentación de Jesús en el templo. María y José \
     cumplen la ley y ofrecen a su Hijo a Dios.",
    "Contemplemos la adoración de los Reyes Magos. Desde lejanas tierras \
     vienen a adorar al Rey de reyes, ofreciéndole sus dones más preciosos.",
];

const CAROLS: [&str; 9] = [
    "A la nanita nana\nNanita ella, nanita ella\nMi Jesús tiene sueño\nBendito sea, bendito sea",
    "Los peces en el río\nLa Virgen se está peinando\nEntre cortina y cortina\nSus cabellos son de oro\nY el peine de plata fina",
    "Noche de paz\nNoche de amor\nTodo duerme en derredor\nSolo velan en la oscuridad\nLos pastores que en el campo están",
    "Ven a cantar\nQue ya nació el niñito\nVen a rezar al pie del portalito\nQue todo es un amor\nQue todo es un cantar",
    "Vamos, pastores, vamos\nVamos a Belén\nA ver en aquel niño\nLa gloria del Edén",
    "Mi burrito sabanero\nVa camino de Belén\nSi me ven, si me ven\nVoy camino de Belén",
    "Campana sobre campana\nY sobre campana una\nAsómate a la ventana\nVerás el Niño en la cuna",
    "Los pastores a Belén\nCorren presurosos\nLlevan de tanto correr\nLos zapatos rotos",
    "Venid, adoremos\nVenid, adoremos\nVenid, adoremos a Cristo el Señor",
];

/// Content for one day.
#[must_use]
pub fn day(number: DayNumber) -> NovenaDay {
    let i = number.index();
    NovenaDay {
        number,
        theme: THEMES.get(i).copied().unwrap_or_default(),
        consideration: CONSIDERATIONS.get(i).copied().unwrap_or_default(),
        carol: CAROLS.get(i).copied().unwrap_or_default(),
    }
}

/// Content for all nine days in order.
#[must_use]
pub fn all_days() -> Vec<NovenaDay> {
    DayNumber::all().map(day).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_every_day_has_content() {
        let days = all_days();
        assert_eq!(days.len(), 9);
        for d in &days {
            assert!(!d.theme.is_empty());
            assert!(!d.consideration.is_empty());
            assert!(!d.carol.is_empty());
        }
    }

    #[test]
    fn test_day_lookup() {
        let first = day(DayNumber::FIRST);
        assert_eq!(first.theme, "El anuncio del Ángel a María");
        assert_eq!(first.date_label(), "16 de diciembre");

        let last = day(DayNumber::LAST);
        assert_eq!(last.theme, "La adoración de los Reyes Magos");
        assert_eq!(last.date_label(), "24 de diciembre");
    }

    #[test]
    fn test_carol_lines() {
        let d = day(DayNumber::new(6).unwrap());
        let lines: Vec<_> = d.carol_lines().collect();
        assert_eq!(lines.first().copied(), Some("Mi burrito sabanero"));
        assert_eq!(lines.len(), 4);
    }
}
