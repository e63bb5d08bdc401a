use crate::Instrument;
use crate::scoring::Item;

/// Stable id of the suicidal-thoughts item.
pub const SUICIDAL_THOUGHTS: &str = "suicidal_thoughts";

/// BDI-II: Beck Depression Inventory, Second Edition.
/// 21 items, each with four statements weighted 0-3. Total 0-63.
pub struct Bdi2;

impl Instrument for Bdi2 {
    fn id(&self) -> &str {
        "bdi2"
    }

    fn name(&self) -> &str {
        "BDI-II"
    }

    fn crisis_item_id(&self) -> Option<&str> {
        Some(SUICIDAL_THOUGHTS)
    }

    fn items(&self) -> &[Item] {
        static ITEMS: std::sync::LazyLock<Vec<Item>> = std::sync::LazyLock::new(|| {
            let items: [(&str, &str, [&str; 4]); 21] = [
                (
                    "sadness",
                    "Sadness",
                    [
                        "I do not feel sad.",
                        "I feel sad much of the time.",
                        "I am sad all the time.",
                        "I am so sad or unhappy that I can't stand it.",
                    ],
                ),
                (
                    "pessimism",
                    "Pessimism",
                    [
                        "I am not discouraged about my future.",
                        "I feel more discouraged about my future than I used to.",
                        "I do not expect things to work out for me.",
                        "I feel my future is hopeless and will only get worse.",
                    ],
                ),
                (
                    "past_failure",
                    "Past Failure",
                    [
                        "I do not feel like a failure.",
                        "I have failed more than I should have.",
                        "As I look back, I see a lot of failures.",
                        "I feel I am a total failure as a person.",
                    ],
                ),
                (
                    "loss_of_pleasure",
                    "Loss of Pleasure",
                    [
                        "I get as much pleasure as I ever did from the things I enjoy.",
                        "I don't enjoy things as much as I used to.",
                        "I get very little pleasure from the things I used to enjoy.",
                        "I can't get any pleasure from the things I used to enjoy.",
                    ],
                ),
                (
                    "guilty_feelings",
                    "Guilty Feelings",
                    [
                        "I don't feel particularly guilty.",
                        "I feel guilty over many things I have done or should have done.",
                        "I feel quite guilty most of the time.",
                        "I feel guilty all of the time.",
                    ],
                ),
                (
                    "punishment_feelings",
                    "Punishment Feelings",
                    [
                        "I don't feel I am being punished.",
                        "I feel I may be punished.",
                        "I expect to be punished.",
                        "I feel I am being punished.",
                    ],
                ),
                (
                    "self_dislike",
                    "Self-Dislike",
                    [
                        "I feel the same about myself as ever.",
                        "I have lost confidence in myself.",
                        "I am disappointed in myself.",
                        "I dislike myself.",
                    ],
                ),
                (
                    "self_criticalness",
                    "Self-Criticalness",
                    [
                        "I don't criticize or blame myself more than usual.",
                        "I am more critical of myself than I used to be.",
                        "I criticize myself for all of my faults.",
                        "I blame myself for everything bad that happens.",
                    ],
                ),
                (
                    "suicidal_thoughts",
                    "Suicidal Thoughts",
                    [
                        "I don't have any thoughts of killing myself.",
                        "I have thoughts of killing myself, but I would not carry them out.",
                        "I would like to kill myself.",
                        "I would kill myself if I had the chance.",
                    ],
                ),
                (
                    "crying",
                    "Crying",
                    [
                        "I don't cry anymore than I used to.",
                        "I cry more than I used to.",
                        "I cry over every little thing.",
                        "I feel like crying but I can't.",
                    ],
                ),
                (
                    "agitation",
                    "Agitation",
                    [
                        "I am no more restless than usual.",
                        "I feel more restless than usual.",
                        "I am so restless it's hard to sit still.",
                        "I am so restless I have to keep moving.",
                    ],
                ),
                (
                    "loss_of_interest",
                    "Loss of Interest",
                    [
                        "I have not lost interest in other people or activities.",
                        "I am less interested than I used to be.",
                        "I have lost most of my interest.",
                        "I have no interest at all.",
                    ],
                ),
                (
                    "indecisiveness",
                    "Indecisiveness",
                    [
                        "I make decisions as well as ever.",
                        "I find it harder to decide than usual.",
                        "I have much greater difficulty in making decisions.",
                        "I can't make decisions at all.",
                    ],
                ),
                (
                    "worthlessness",
                    "Worthlessness",
                    [
                        "I do not feel worthless.",
                        "I feel less valuable than others.",
                        "I feel very worthless.",
                        "I feel completely worthless.",
                    ],
                ),
                (
                    "loss_of_energy",
                    "Loss of Energy",
                    [
                        "I have as much energy as ever.",
                        "I have less energy than I used to have.",
                        "I don't have enough energy to do very much.",
                        "I don't have enough energy to do anything.",
                    ],
                ),
                (
                    "sleeping_pattern",
                    "Sleeping Pattern",
                    [
                        "I sleep as well as usual.",
                        "I sleep a little more/less than usual.",
                        "I sleep a lot more/less than usual.",
                        "I sleep most of the day or wake up early and can't go back to sleep.",
                    ],
                ),
                (
                    "irritability",
                    "Irritability",
                    [
                        "I am not more irritable than usual.",
                        "I am more irritable than usual.",
                        "I am much more irritable.",
                        "I am irritable all the time.",
                    ],
                ),
                (
                    "appetite",
                    "Appetite",
                    [
                        "My appetite hasn't changed.",
                        "My appetite is somewhat increased/decreased.",
                        "My appetite is much more/less than before.",
                        "I have no appetite or eat constantly.",
                    ],
                ),
                (
                    "concentration",
                    "Concentration",
                    [
                        "I can concentrate well.",
                        "I can't concentrate as well.",
                        "I find it hard to keep my mind on things.",
                        "I can't concentrate on anything.",
                    ],
                ),
                (
                    "fatigue",
                    "Fatigue",
                    [
                        "I am not more tired than usual.",
                        "I get tired more easily than before.",
                        "I get tired doing simple tasks.",
                        "I'm too tired to do anything.",
                    ],
                ),
                (
                    "interest_in_sex",
                    "Interest in Sex",
                    [
                        "No change in interest.",
                        "Less interest than before.",
                        "Much less interest.",
                        "No interest at all.",
                    ],
                ),
            ];

            items
                .iter()
                .map(|(id, title, options)| Item {
                    id: id.to_string(),
                    title: title.to_string(),
                    options: options.iter().map(|o| o.to_string()).collect(),
                })
                .collect()
        });
        &ITEMS
    }
}
